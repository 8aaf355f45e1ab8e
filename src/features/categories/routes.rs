use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/api/categories/tree", get(handlers::get_category_tree))
        .route("/api/categories/stats", get(handlers::get_category_stats))
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        spawn_upstream, test_cache, test_catalog_client, with_session, TEST_COOKIE,
    };
    use axum::http::{header, HeaderName, HeaderValue, StatusCode};
    use axum::Json;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server(upstream: Router) -> TestServer {
        let base_url = spawn_upstream(upstream).await;
        let service = Arc::new(CategoryService::new(
            Arc::new(test_catalog_client(&base_url)),
            test_cache(),
        ));
        TestServer::new(with_session(routes(service))).unwrap()
    }

    fn hierarchy() -> Router {
        Router::new().route(
            "/categories/hierarchy",
            get(|| async {
                Json(json!({"message": "ok", "data": [
                    {"id": 1, "name": "Electronics", "slug": "electronics", "status": 1, "children": [
                        {"id": 2, "name": "Phones", "slug": "phones", "parentId": 1, "status": 0}
                    ]},
                    {"id": 5, "name": "Books", "slug": "books", "status": 1}
                ]}))
            }),
        )
    }

    fn expired() -> Router {
        Router::new().route(
            "/categories/hierarchy",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "Unauthorized", "data": null})),
                )
            }),
        )
    }

    fn cookie() -> HeaderValue {
        HeaderValue::from_static(TEST_COOKIE)
    }

    #[tokio::test]
    async fn test_tree_search_and_status() {
        let server = server(hierarchy()).await;

        let response = server
            .get("/api/categories/tree")
            .add_query_param("search", "phones")
            .add_query_param("status", "inactive")
            .add_header(header::COOKIE, cookie())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let nodes = body["data"]["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["name"], "Electronics");
        assert_eq!(nodes[0]["matched"], false);
        assert_eq!(nodes[0]["children"][0]["name"], "Phones");
        assert_eq!(nodes[0]["children"][0]["status_label"], "Inactive");
        assert_eq!(body["data"]["total_nodes"], 3);
    }

    #[tokio::test]
    async fn test_tree_empty_state_when_nothing_matches() {
        let server = server(hierarchy()).await;

        let response = server
            .get("/api/categories/tree")
            .add_query_param("search", "garden")
            .add_header(header::COOKIE, cookie())
            .await;

        let body: Value = response.json();
        assert_eq!(body["data"]["empty_state"], "no_matches");
        assert!(body["data"]["nodes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cookie_redirects_to_login() {
        let server = server(hierarchy()).await;

        let response = server.get("/api/categories/tree").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/login");
    }

    #[tokio::test]
    async fn test_upstream_401_clears_cookie_and_redirects() {
        let server = server(expired()).await;

        let response = server
            .get("/api/categories/tree")
            .add_header(header::COOKIE, cookie())
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/login");
        let cleared: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert!(cleared.iter().any(|c| c.starts_with("auth-token=;")));
    }

    #[tokio::test]
    async fn test_upstream_401_on_login_screen_does_not_redirect() {
        let server = server(expired()).await;

        let response = server
            .get("/api/categories/tree")
            .add_header(header::COOKIE, cookie())
            .add_header(
                HeaderName::from_static("x-current-path"),
                HeaderValue::from_static("/login?next=/categories"),
            )
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_upstream() {
        // the stub has no POST route, so reaching it would yield 405
        let server = server(hierarchy()).await;

        let response = server
            .post("/api/categories")
            .add_header(header::COOKIE, cookie())
            .json(&json!({"name": "", "slug": "Bad Slug"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }
}
