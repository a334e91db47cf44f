//! Password hashing and verification using Argon2id

use crate::{config::AppConfig, error::AppError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Password error taxonomy. A wrong password is an expected outcome and gets
/// its own kind; a hash that cannot even be parsed is a server-side fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password does not match")]
    Mismatch,

    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Password hasher with explicit, deliberately expensive parameters
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with OWASP-recommended parameters
    /// (m=64MiB, t=3 iterations, p=4 lanes)
    pub fn new() -> Self {
        let params = Params::new(65536, 3, 4, None).expect("Invalid Argon2 params");

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self { argon2 }
    }

    /// Hash a password. The salt is freshly drawn from the OS random source
    /// on every call, so hashing the same password twice yields different
    /// strings.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                PasswordError::Hash(e.to_string())
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash. Comparison is constant-time,
    /// delegated to the argon2 verifier.
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            PasswordError::MalformedHash
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::Hash(e.to_string())),
        }
    }

    /// Validate a new password against the configured policy
    pub fn validate_password_policy(password: &str, config: &AppConfig) -> Result<(), AppError> {
        let policy = &config.security;

        if password.len() < policy.password_min_length {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                policy.password_min_length
            )));
        }

        if policy.password_require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        if policy.password_require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Password must contain at least one digit".to_string(),
            ));
        }

        if policy.password_require_special {
            let has_special = password.chars().any(|c| !c.is_alphanumeric());
            if !has_special {
                return Err(AppError::BadRequest(
                    "Password must contain at least one special character".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
