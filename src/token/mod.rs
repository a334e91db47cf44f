//! Token issuance and verification
//! One capability interface with two symmetric implementations: HMAC-signed
//! claims (JWT) and encrypted-then-authenticated local tokens (PASETO).
//! The implementation is selected once at startup from configuration.

mod jwt;
mod paseto;
mod payload;

pub use jwt::JwtMaker;
pub use paseto::PasetoMaker;
pub use payload::Payload;

use crate::config::AppConfig;
use chrono::Duration;
use secrecy::ExposeSecret;
use std::sync::Arc;
use thiserror::Error;

/// Token error taxonomy. Callers depend on `Expired` and `Invalid` being
/// distinct kinds: the first means "refresh", the second means "go away".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Cryptographically sound token whose validity window has elapsed
    #[error("token has expired")]
    Expired,

    /// Malformed structure, unexpected algorithm, or failed MAC/signature.
    /// The sub-cause is deliberately not exposed.
    #[error("token is invalid")]
    Invalid,

    #[error("invalid key size: must be at least {min} bytes")]
    KeyTooShort { min: usize },

    #[error("invalid key size: must be exactly {expected} bytes")]
    KeySize { expected: usize },

    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Capability interface for creating and verifying bearer tokens.
///
/// Implementations are stateless beyond the key material: every call is a
/// pure function of its inputs, safe to share across request tasks.
pub trait TokenMaker: Send + Sync {
    /// Mint a token for the given identity, valid for `duration`.
    /// Returns the wire-format string together with the payload so callers
    /// can read `id` and `expired_at` without re-parsing the token.
    fn create_token(
        &self,
        phone: &str,
        user_id: i64,
        name: &str,
        company_id: i64,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError>;

    /// Verify a wire-format token and return its payload.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Build the token maker selected by configuration. Called once at startup;
/// `AppConfig::validate` has already vetted the provider name and key length.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn TokenMaker>, TokenError> {
    let secret = config.security.token_symmetric_key.expose_secret();

    match config.security.token_provider.to_lowercase().as_str() {
        "jwt" => Ok(Arc::new(JwtMaker::new(secret)?)),
        _ => Ok(Arc::new(PasetoMaker::new(secret)?)),
    }
}
