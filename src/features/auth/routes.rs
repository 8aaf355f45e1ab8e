use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Create routes for the auth feature
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/otp/generate", post(handlers::generate_otp))
        .route("/api/auth/sign-in", post(handlers::sign_in))
        .route("/api/auth/sign-up", post(handlers::sign_up))
        .route("/api/auth/me", get(handlers::get_me))
        .route("/api/auth/logout", post(handlers::logout))
        .with_state(service)
}
