//! Authentication HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::{client_ip, AppState},
    models::auth::{LoginRequest, LogoutRequest, RefreshTokenRequest},
    models::user::validate_phone,
};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// Log in with phone and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_phone(&req.phone)?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let ip = client_ip(&headers);

    let rsp = state.auth_service.login(req, &ip, &user_agent).await?;

    Ok(Json(rsp))
}

/// Exchange a refresh token for a new access token
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rsp = state.auth_service.refresh(req).await?;

    Ok(Json(rsp))
}

/// Revoke the session behind a refresh token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<LogoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service
        .logout(req, auth_context.user_id)
        .await?;

    Ok(Json(json!({
        "message": "Session revoked"
    })))
}
