//! Authentication service: login, token refresh, logout

use crate::{
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::{auth::*, session::Session, user::UserResponse},
    repository::{CompanyRepository, SessionRepository, UserRepository},
    token::TokenMaker,
};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    token_maker: Arc<dyn TokenMaker>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(db: PgPool, token_maker: Arc<dyn TokenMaker>, config: Arc<AppConfig>) -> Self {
        Self {
            db,
            token_maker,
            config,
        }
    }

    /// Log a user in: verify the password, mint exactly one access token and
    /// one refresh token, and persist a session keyed by the refresh token's
    /// payload id.
    pub async fn login(
        &self,
        req: LoginRequest,
        client_ip: &str,
        user_agent: &str,
    ) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_phone(&req.phone)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let hasher = PasswordHasher::new();
        hasher.verify(&req.password, &user.password_hash).map_err(|e| {
            tracing::warn!(user_id = user.id, %client_ip, "Login failed: {}", e);
            e
        })?;

        let access_duration = Duration::seconds(self.config.security.access_token_exp_secs as i64);
        let refresh_duration =
            Duration::seconds(self.config.security.refresh_token_exp_secs as i64);

        let (access_token, access_payload) = self.token_maker.create_token(
            &user.phone,
            user.id,
            &user.name,
            user.company_id,
            access_duration,
        )?;

        let (refresh_token, refresh_payload) = self.token_maker.create_token(
            &user.phone,
            user.id,
            &user.name,
            user.company_id,
            refresh_duration,
        )?;

        let session_repo = SessionRepository::new(self.db.clone());
        let session = session_repo
            .create(&Session {
                id: refresh_payload.id,
                user_id: user.id,
                refresh_token: refresh_token.clone(),
                user_agent: user_agent.to_string(),
                client_ip: client_ip.to_string(),
                is_blocked: false,
                expires_at: refresh_payload.expired_at,
                created_at: Utc::now(),
            })
            .await?;

        let company = CompanyRepository::new(self.db.clone())
            .find_by_id(user.company_id)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(
            user_id = user.id,
            company_id = user.company_id,
            session_id = %session.id,
            "Login succeeded"
        );

        Ok(LoginResponse {
            session_id: session.id,
            access_token,
            access_token_expires_at: access_payload.expired_at,
            refresh_token,
            refresh_token_expires_at: refresh_payload.expired_at,
            user: UserResponse::new(user, company),
        })
    }

    /// Mint a new access token against a presented refresh token.
    ///
    /// The token must verify cryptographically, its session row must exist
    /// and be unblocked, belong to the same user, hold the same token
    /// string, and still be inside its validity window. The refresh token
    /// itself is not rotated.
    pub async fn refresh(&self, req: RefreshTokenRequest) -> Result<RefreshTokenResponse, AppError> {
        let payload = self.token_maker.verify_token(&req.refresh_token)?;

        let session_repo = SessionRepository::new(self.db.clone());
        let session = session_repo
            .find_by_id(payload.id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if session.is_blocked {
            tracing::warn!(session_id = %session.id, "Refresh rejected: session blocked");
            return Err(AppError::Unauthorized);
        }

        if session.user_id != payload.user_id {
            tracing::warn!(session_id = %session.id, "Refresh rejected: user mismatch");
            return Err(AppError::Unauthorized);
        }

        if session.refresh_token != req.refresh_token {
            tracing::warn!(session_id = %session.id, "Refresh rejected: token mismatch");
            return Err(AppError::Unauthorized);
        }

        if session.expires_at < Utc::now() {
            tracing::warn!(session_id = %session.id, "Refresh rejected: session expired");
            return Err(AppError::Unauthorized);
        }

        let access_duration = Duration::seconds(self.config.security.access_token_exp_secs as i64);
        let (access_token, access_payload) = self.token_maker.create_token(
            &payload.phone,
            payload.user_id,
            &payload.name,
            payload.company_id,
            access_duration,
        )?;

        Ok(RefreshTokenResponse {
            access_token,
            access_token_expires_at: access_payload.expired_at,
        })
    }

    /// Log out by blocking the session behind the presented refresh token
    pub async fn logout(&self, req: LogoutRequest, user_id: i64) -> Result<(), AppError> {
        let payload = self.token_maker.verify_token(&req.refresh_token)?;

        let session_repo = SessionRepository::new(self.db.clone());
        let session = session_repo
            .find_by_id(payload.id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Only the session's owner may revoke it
        if session.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        session_repo.block(session.id).await?;

        tracing::info!(session_id = %session.id, user_id, "Session revoked");

        Ok(())
    }
}
