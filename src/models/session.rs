//! Refresh-token session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side record tracking one refresh token.
///
/// Created at login and immutable afterwards, except for `is_blocked` which
/// is the sole mechanism for revoking a still-unexpired refresh token. The
/// token core never reads or writes this record; it only produces the `id`
/// and `expires_at` values persisted here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Equals the refresh token payload's id
    pub id: Uuid,
    pub user_id: i64,
    /// The opaque token string the client holds
    pub refresh_token: String,
    /// Captured at creation for audit and anomaly detection
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    /// Must equal the refresh token payload's expired_at
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
