use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature, variants included
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/api/products/filter", get(handlers::filter_products))
        .route("/api/products/stats", get(handlers::get_product_stats))
        .route(
            "/api/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/api/products/{id}/variants",
            get(handlers::list_variants).post(handlers::create_variant),
        )
        .route(
            "/api/products/{id}/variants/{variant_id}",
            put(handlers::update_variant).delete(handlers::delete_variant),
        )
        .with_state(service)
}
