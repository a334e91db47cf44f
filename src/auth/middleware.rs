//! Bearer token authentication middleware

use crate::{error::AppError, middleware::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// Verified identity attached to request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token_id: Uuid,
    pub user_id: i64,
    pub phone: String,
    pub name: String,
    pub company_id: i64,
}

// FromRequestParts lets handlers take AuthContext as an argument directly
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(|t| t.to_string()))
        .ok_or(AppError::Unauthorized)
}

/// Token verification middleware. The verified payload is exposed to
/// downstream handlers through the AuthContext extension; an expired token
/// surfaces as a distinguishable 401 so clients know to refresh.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let payload = state.token_maker.verify_token(&token)?;

    let auth_context = AuthContext {
        token_id: payload.id,
        user_id: payload.user_id,
        phone: payload.phone,
        name: payload.name,
        company_id: payload.company_id,
    };
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        let token = extract_token(&headers).unwrap();
        assert_eq!(token, "test_token_123");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(extract_token(&headers).is_err());
    }
}
