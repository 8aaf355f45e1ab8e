use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::brands::BrandService;
    use crate::features::categories::CategoryService;
    use crate::features::contact::ContactService;
    use crate::features::coupons::CouponService;
    use crate::features::product_types::ProductTypeService;
    use crate::features::products::ProductService;
    use crate::shared::test_helpers::{
        spawn_upstream, test_cache, test_catalog_client, with_session, TEST_COOKIE,
    };
    use axum::http::{header, HeaderValue, StatusCode};
    use axum::Json;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn stats(total: i64) -> Json<Value> {
        Json(json!({"message": "ok", "data": {"total": total}}))
    }

    async fn server(upstream: Router) -> TestServer {
        let base_url = spawn_upstream(upstream).await;
        let client = Arc::new(test_catalog_client(&base_url));
        let cache = test_cache();

        let service = Arc::new(DashboardService::new(
            Arc::new(CategoryService::new(Arc::clone(&client), Arc::clone(&cache))),
            Arc::new(ProductService::new(Arc::clone(&client), Arc::clone(&cache))),
            Arc::new(BrandService::new(Arc::clone(&client), Arc::clone(&cache))),
            Arc::new(ProductTypeService::new(Arc::clone(&client), Arc::clone(&cache))),
            Arc::new(CouponService::new(Arc::clone(&client), Arc::clone(&cache))),
            Arc::new(ContactService::new(client, cache)),
        ));
        TestServer::new(with_session(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_summary_survives_one_failing_stats_call() {
        // no /coupons/stats route: the stub answers 404
        let upstream = Router::new()
            .route("/categories/stats", get(|| async { stats(12) }))
            .route("/products/stats", get(|| async { stats(340) }))
            .route("/brands/stats", get(|| async { stats(25) }))
            .route("/product-types/stats", get(|| async { stats(4) }))
            .route("/client/contact/stats", get(|| async { stats(9) }));
        let server = server(upstream).await;

        let response = server
            .get("/api/dashboard/summary")
            .add_header(header::COOKIE, HeaderValue::from_static(TEST_COOKIE))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["products"]["total"], 340);
        assert_eq!(body["data"]["contact"]["total"], 9);
        assert!(body["data"]["coupons"].is_null());
        assert_eq!(body["data"]["unavailable"], json!(["coupons"]));
    }

    #[tokio::test]
    async fn test_summary_with_expired_session_redirects() {
        let upstream = Router::new().route(
            "/categories/stats",
            get(|| async { (StatusCode::UNAUTHORIZED, "expired") }),
        );
        let server = server(upstream).await;

        let response = server
            .get("/api/dashboard/summary")
            .add_header(header::COOKIE, HeaderValue::from_static(TEST_COOKIE))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
    }
}
