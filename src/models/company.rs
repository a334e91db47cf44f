//! Company (tenant) domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company record. Companies are the tenancy boundary: every user belongs
/// to exactly one, and tokens carry the company id for authorization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: i64,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
