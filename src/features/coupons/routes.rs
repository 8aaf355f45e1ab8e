use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::coupons::handlers;
use crate::features::coupons::services::CouponService;

/// Create routes for the coupons feature
pub fn routes(service: Arc<CouponService>) -> Router {
    Router::new()
        .route(
            "/api/coupons",
            get(handlers::list_coupons).post(handlers::create_coupon),
        )
        .route("/api/coupons/stats", get(handlers::get_coupon_stats))
        .route(
            "/api/coupons/{id}",
            get(handlers::get_coupon)
                .put(handlers::update_coupon)
                .delete(handlers::delete_coupon),
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
    use axum::routing::post;
    use axum::Json;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server() -> TestServer {
        let upstream = Router::new().route(
            "/coupons",
            post(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({"message": "Coupon code already exists", "data": null})),
                )
            }),
        );
        let base_url = spawn_upstream(upstream).await;
        let service = Arc::new(CouponService::new(
            Arc::new(test_catalog_client(&base_url)),
            test_cache(),
        ));
        TestServer::new(with_session(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_percentage_over_hundred_is_rejected_locally() {
        let server = server().await;

        let response = server
            .post("/api/coupons")
            .add_header(header::COOKIE, HeaderValue::from_static(TEST_COOKIE))
            .json(&json!({
                "code": "HALFPLUS",
                "discount_type": "percentage",
                "discount_value": "150"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_conflict_message_is_shown() {
        let server = server().await;

        let response = server
            .post("/api/coupons")
            .add_header(header::COOKIE, HeaderValue::from_static(TEST_COOKIE))
            .json(&json!({
                "code": "SUMMER24",
                "discount_type": "fixed",
                "discount_value": "10.00"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["message"], "Coupon code already exists");
    }
}
