//! User HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    auth::password::PasswordHasher,
    error::AppError,
    middleware::AppState,
    models::user::{validate_phone, CreateUserRequest, UserResponse},
    repository::{CompanyRepository, UserRepository},
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// Create a user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_phone(&req.phone)?;
    PasswordHasher::validate_password_policy(&req.password, &state.config)?;

    let company = CompanyRepository::new(state.db.clone())
        .find_by_id(req.company_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let hasher = PasswordHasher::new();
    let password_hash = hasher.hash(&req.password)?;

    let user = UserRepository::new(state.db.clone())
        .create(&req.name, &req.phone, &password_hash, company.id)
        .await?;

    tracing::info!(user_id = user.id, company_id = company.id, "User created");

    Ok(Json(UserResponse::new(user, company)))
}

/// Return the calling user's profile
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::new(state.db.clone())
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let company = CompanyRepository::new(state.db.clone())
        .find_by_id(user.company_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(UserResponse::new(user, company)))
}
