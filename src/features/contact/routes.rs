use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::contact::handlers;
use crate::features::contact::services::ContactService;

/// Create routes for the contact messages feature
pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/contact", get(handlers::list_contact_messages))
        .route("/api/contact/stats", get(handlers::get_contact_stats))
        .route(
            "/api/contact/{id}",
            get(handlers::get_contact_message).delete(handlers::delete_contact_message),
        )
        .route(
            "/api/contact/{id}/status",
            put(handlers::update_contact_status),
        )
        .with_state(service)
}
