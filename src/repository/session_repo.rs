//! Session repository
//! Owns persistence and lifetime of refresh-token sessions.

use crate::{error::AppError, models::session::Session};
use sqlx::PgPool;
use uuid::Uuid;

pub struct SessionRepository {
    db: PgPool,
}

impl SessionRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Persist a session, keyed by the refresh token payload's id
    pub async fn create(&self, session: &Session) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (
                id, user_id, refresh_token, user_agent, client_ip, is_blocked, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.refresh_token)
        .bind(&session.user_agent)
        .bind(&session.client_ip)
        .bind(session.is_blocked)
        .bind(session.expires_at)
        .fetch_one(&self.db)
        .await?;

        Ok(session)
    }

    /// Look up a session by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(session)
    }

    /// Block a session, revoking its refresh token before natural expiry.
    /// This flag is the only field a session ever changes.
    pub async fn block(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE sessions SET is_blocked = true WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete sessions whose refresh token has expired
    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < now()")
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
