//! Route registration
//! Wires handlers to paths and applies the middleware stack.

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{auth, handlers, middleware::AppState};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/healthz", get(handlers::health::health_check))
        .route("/api/v1/users", post(handlers::user::create_user))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/refresh", post(handlers::auth::refresh));

    let protected = Router::new()
        .route("/api/v1/users/me", get(handlers::user::get_me))
        .route("/api/v1/companies/{id}", get(handlers::company::get_company))
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(axum_middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
