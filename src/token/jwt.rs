//! JWT token maker: HMAC-SHA256 signed claims

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{Payload, TokenError, TokenMaker};

/// Minimum secret size for HS256
pub const MIN_SECRET_SIZE: usize = 32;

/// Token maker backed by HMAC-signed JWT claims
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtMaker {
    /// Create a maker from a symmetric secret of at least 32 bytes.
    /// Key length is checked here, once, not on every call.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_SIZE {
            return Err(TokenError::KeyTooShort {
                min: MIN_SECRET_SIZE,
            });
        }

        // HS256 is the only algorithm this verifier accepts. A token whose
        // header advertises "none" or any other algorithm fails before the
        // signature is even looked at.
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is decided by Payload::valid after signature verification,
        // not by the library.
        validation.validate_exp = false;
        validation.required_spec_claims = Default::default();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        phone: &str,
        user_id: i64,
        name: &str,
        company_id: i64,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(phone, user_id, name, company_id, duration);

        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let data = decode::<Payload>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(kind = ?e.kind(), "JWT verification failed");
            TokenError::Invalid
        })?;

        let payload = data.claims;
        payload.valid()?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify() {
        let maker = JwtMaker::new("test_secret_key_32_characters_ok").unwrap();

        let (token, payload) = maker
            .create_token("+25470000001", 7, "Jane", 3, Duration::minutes(1))
            .unwrap();
        assert!(!token.is_empty());

        let verified = maker.verify_token(&token).unwrap();
        assert_eq!(verified.id, payload.id);
        assert_eq!(verified.phone, "+25470000001");
        assert_eq!(verified.company_id, 3);
    }

    #[test]
    fn test_secret_too_short() {
        let result = JwtMaker::new("short");
        assert_eq!(
            result.err(),
            Some(TokenError::KeyTooShort {
                min: MIN_SECRET_SIZE
            })
        );
    }
}
