#[cfg(test)]
use crate::core::config::{CatalogApiConfig, SessionConfig};
#[cfg(test)]
use crate::core::middleware::{session_middleware, SessionLayer};
#[cfg(test)]
use crate::modules::catalog_api::CatalogClient;
#[cfg(test)]
use crate::shared::query_cache::QueryCache;

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;

/// Serve a stub catalog service on an ephemeral port and return its base URL
#[cfg(test)]
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().expect("Failed to get addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

#[cfg(test)]
pub fn test_catalog_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(&CatalogApiConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        me_attempts: 2,
    })
    .expect("Failed to build catalog client")
}

#[cfg(test)]
pub fn test_cache() -> Arc<QueryCache> {
    Arc::new(QueryCache::new(Duration::from_secs(60)))
}

/// Wrap feature routes the way `main` does so cookies and 401 redirects behave
/// as in production
#[cfg(test)]
pub fn with_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn_with_state(
        Arc::new(SessionLayer {
            config: SessionConfig::default(),
            cache: test_cache(),
        }),
        session_middleware,
    ))
}

/// Cookie header value carrying a credential
#[cfg(test)]
pub const TEST_COOKIE: &str = "auth-token=test-token";
