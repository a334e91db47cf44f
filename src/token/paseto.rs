//! PASETO token maker: v4.local encrypted-and-authenticated tokens

use chrono::Duration;
use pasetors::claims::{Claims, ClaimsValidationRules};
use pasetors::keys::SymmetricKey;
use pasetors::token::UntrustedToken;
use pasetors::{local, version4::V4, Local};

use super::{Payload, TokenError, TokenMaker};

/// Exact symmetric key size required by v4.local
pub const SYMMETRIC_KEY_SIZE: usize = 32;

const PAYLOAD_CLAIM: &str = "payload";

/// Token maker backed by PASETO v4.local symmetric encryption
pub struct PasetoMaker {
    key: SymmetricKey<V4>,
}

impl PasetoMaker {
    /// Create a maker from a symmetric key of exactly 32 bytes.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.len() != SYMMETRIC_KEY_SIZE {
            return Err(TokenError::KeySize {
                expected: SYMMETRIC_KEY_SIZE,
            });
        }

        let key = SymmetricKey::<V4>::from(secret.as_bytes()).map_err(|_| TokenError::KeySize {
            expected: SYMMETRIC_KEY_SIZE,
        })?;

        Ok(Self { key })
    }
}

impl TokenMaker for PasetoMaker {
    fn create_token(
        &self,
        phone: &str,
        user_id: i64,
        name: &str,
        company_id: i64,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(phone, user_id, name, company_id, duration);

        // The payload rides as one custom claim and its own `exp` field is
        // the expiry authority, checked by Payload::valid on verify. The
        // registered expiry claim is dropped so there is exactly one clock
        // to reason about.
        let mut claims = Claims::new().map_err(|e| TokenError::Encode(e.to_string()))?;
        claims.non_expiring();
        claims
            .add_additional(
                PAYLOAD_CLAIM,
                serde_json::to_value(&payload).map_err(|e| TokenError::Encode(e.to_string()))?,
            )
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        let token = local::encrypt(&self.key, &claims, None, None)
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let untrusted =
            UntrustedToken::<Local, V4>::try_from(token).map_err(|_| TokenError::Invalid)?;

        let mut rules = ClaimsValidationRules::new();
        rules.allow_non_expiring();

        // Decryption authenticates the whole token; any tampering fails here.
        let trusted = local::decrypt(&self.key, &untrusted, &rules, None, None).map_err(|e| {
            tracing::debug!(error = %e, "PASETO verification failed");
            TokenError::Invalid
        })?;

        let claims = trusted.payload_claims().ok_or(TokenError::Invalid)?;
        let value = claims.get_claim(PAYLOAD_CLAIM).ok_or(TokenError::Invalid)?;
        let payload: Payload =
            serde_json::from_value(value.clone()).map_err(|_| TokenError::Invalid)?;

        payload.valid()?;

        Ok(payload)
    }
}
