//! Token payload: the authenticated identity carried inside every token

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TokenError;

/// Claims embedded in every issued token.
///
/// Timestamps serialize as numeric `iat`/`exp` seconds so the JWT wire
/// format stays conventional; the PASETO maker reuses the same encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique token identifier. For a refresh token this keys the persisted
    /// session row, which is what makes revocation possible.
    pub id: Uuid,
    /// Subject phone number (stable user handle)
    pub phone: String,
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Tenant identifier
    pub company_id: i64,
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Build a payload valid for `duration` starting now. The id is drawn
    /// from the OS entropy source (UUIDv4), never a counter.
    pub fn new(
        phone: &str,
        user_id: i64,
        name: &str,
        company_id: i64,
        duration: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone: phone.to_string(),
            user_id,
            name: name.to_string(),
            company_id,
            issued_at: now,
            expired_at: now + duration,
        }
    }

    /// The single expiry check verifiers invoke. Must run only after the
    /// cryptographic check has passed, so unverified tokens leak no timing
    /// signal.
    pub fn valid(&self) -> Result<(), TokenError> {
        if Utc::now() > self.expired_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}
