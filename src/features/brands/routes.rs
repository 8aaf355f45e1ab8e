use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::brands::handlers;
use crate::features::brands::services::BrandService;

/// Create routes for the brands feature
pub fn routes(service: Arc<BrandService>) -> Router {
    Router::new()
        .route(
            "/api/brands",
            get(handlers::list_brands).post(handlers::create_brand),
        )
        .route("/api/brands/stats", get(handlers::get_brand_stats))
        .route(
            "/api/brands/{id}",
            get(handlers::get_brand)
                .put(handlers::update_brand)
                .delete(handlers::delete_brand),
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
    use axum::routing::delete;
    use axum::Json;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn server(list_hits: Arc<AtomicUsize>) -> TestServer {
        let upstream = Router::new().route(
            "/brands",
            get(move || {
                let hits = Arc::clone(&list_hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"message": "ok", "data": [
                        {"id": 1, "name": "Acme", "slug": "acme", "status": 1},
                        {"id": 2, "name": "Globex", "slug": "globex", "status": 0},
                        {"id": 3, "name": "Acme Outlet", "slug": "acme-outlet", "status": 0}
                    ]}))
                }
            })
            .post(|Json(body): Json<Value>| async move {
                let mut created = body.clone();
                created["id"] = json!(4);
                Json(json!({"message": "ok", "data": created}))
            }),
        )
        .route(
            "/brands/{id}",
            delete(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Cannot delete brand that still has products"})),
                )
            }),
        );
        let base_url = spawn_upstream(upstream).await;
        let service = Arc::new(BrandService::new(
            Arc::new(test_catalog_client(&base_url)),
            test_cache(),
        ));
        TestServer::new(with_session(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_list_filters_client_side() {
        let hits = Arc::new(AtomicUsize::new(0));
        let server = server(Arc::clone(&hits)).await;

        let response = server
            .get("/api/brands")
            .add_query_param("search", "ACME")
            .add_query_param("status", "inactive")
            .add_header(header::COOKIE, HeaderValue::from_static(TEST_COOKIE))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Acme Outlet");
    }

    #[tokio::test]
    async fn test_create_refetches_list() {
        let hits = Arc::new(AtomicUsize::new(0));
        let server = server(Arc::clone(&hits)).await;
        let cookie = HeaderValue::from_static(TEST_COOKIE);

        server.get("/api/brands").add_header(header::COOKIE, cookie.clone()).await;
        server.get("/api/brands").add_header(header::COOKIE, cookie.clone()).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let response = server
            .post("/api/brands")
            .add_header(header::COOKIE, cookie.clone())
            .json(&json!({"name": "Initech Labs"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], "initech-labs");

        server.get("/api/brands").add_header(header::COOKIE, cookie).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_server_failure_message_reaches_the_ui() {
        let server = server(Arc::new(AtomicUsize::new(0))).await;

        let response = server
            .delete("/api/brands/1")
            .add_header(header::COOKIE, HeaderValue::from_static(TEST_COOKIE))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.json::<Value>()["message"],
            "Cannot delete brand that still has products"
        );
    }
}
