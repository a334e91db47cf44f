//! User domain models

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::company::Company;
use crate::error::AppError;

/// User record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub password_hash: String,
    pub password_changed_at: DateTime<Utc>,
    pub name: String,
    pub company_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("valid phone regex"));

/// Phone numbers are E.164 throughout the system
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if !PHONE_RE.is_match(phone) {
        return Err(AppError::BadRequest(
            "Phone number must be in E.164 format".to_string(),
        ));
    }
    Ok(())
}

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub phone: String,
    #[validate(range(min = 1))]
    pub company_id: i64,
}

/// User profile returned to clients. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub name: String,
    pub phone: String,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: Company,
}

impl UserResponse {
    pub fn new(user: User, company: Company) -> Self {
        Self {
            name: user.name,
            phone: user.phone,
            password_changed_at: user.password_changed_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
            company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+25470000001").is_ok());
        assert!(validate_phone("+14155550132").is_ok());

        assert!(validate_phone("25470000001").is_err());
        assert!(validate_phone("+0123456789").is_err());
        assert!(validate_phone("+2547").is_err());
        assert!(validate_phone("+2547000abc01").is_err());
        assert!(validate_phone("").is_err());
    }
}
