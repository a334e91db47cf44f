//! Company HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    repository::CompanyRepository,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Get a company. Callers may only read their own tenant.
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if auth_context.company_id != id {
        tracing::warn!(
            user_id = auth_context.user_id,
            requested = id,
            tenant = auth_context.company_id,
            "Cross-tenant company read denied"
        );
        return Err(AppError::Forbidden);
    }

    let company = CompanyRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(company))
}
