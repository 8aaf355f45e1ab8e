use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::product_types::handlers;
use crate::features::product_types::services::ProductTypeService;

/// Create routes for the product types feature
pub fn routes(service: Arc<ProductTypeService>) -> Router {
    Router::new()
        .route(
            "/api/product-types",
            get(handlers::list_product_types).post(handlers::create_product_type),
        )
        .route(
            "/api/product-types/stats",
            get(handlers::get_product_type_stats),
        )
        .route(
            "/api/product-types/{id}",
            get(handlers::get_product_type)
                .put(handlers::update_product_type)
                .delete(handlers::delete_product_type),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        spawn_upstream, test_cache, test_catalog_client, with_session, TEST_COOKIE,
    };
    use axum::http::{header, HeaderValue, StatusCode};
    use axum::Json;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_search_covers_attribute_names_and_stats_pass_through() {
        let upstream = Router::new()
            .route(
                "/product-types",
                get(|| async {
                    Json(json!({"message": "ok", "data": [
                        {"id": 1, "name": "Apparel", "slug": "apparel", "attributes": ["size", "color"]},
                        {"id": 2, "name": "Books", "slug": "books", "attributes": ["format"]}
                    ]}))
                }),
            )
            .route(
                "/product-types/stats",
                get(|| async {
                    Json(json!({"message": "ok", "data": {"total": 2, "active": 2}}))
                }),
            );
        let base_url = spawn_upstream(upstream).await;
        let service = Arc::new(ProductTypeService::new(
            Arc::new(test_catalog_client(&base_url)),
            test_cache(),
        ));
        let server = TestServer::new(with_session(routes(service))).unwrap();
        let cookie = HeaderValue::from_static(TEST_COOKIE);

        let response = server
            .get("/api/product-types")
            .add_query_param("search", "colo")
            .add_header(header::COOKIE, cookie.clone())
            .await;
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Apparel");

        let response = server
            .get("/api/product-types/stats")
            .add_header(header::COOKIE, cookie)
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"], json!({"total": 2, "active": 2}));
    }
}
