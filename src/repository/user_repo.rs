//! User repository

use crate::{error::AppError, models::user::User};
use sqlx::PgPool;

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find a user by phone number
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// Create a user. The caller supplies an already-hashed password.
    pub async fn create(
        &self,
        name: &str,
        phone: &str,
        password_hash: &str,
        company_id: i64,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, phone, password_hash, company_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(password_hash)
        .bind(company_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest("Phone number is already registered".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(user)
    }
}
