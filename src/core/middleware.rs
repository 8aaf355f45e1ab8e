use crate::core::config::SessionConfig;
use crate::core::error::SessionExpired;
use crate::core::session::{on_unauthorized, read_token, removal_cookies, Session, UnauthorizedAction};
use crate::shared::query_cache::QueryCache;
use crate::shared::constants::CURRENT_PATH_HEADER;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                Body::from("Unauthorized"),
            )
                .into_response();

            Err(response)
        })
    }
}

/// State of [`session_middleware`]
pub struct SessionLayer {
    pub config: SessionConfig,
    pub cache: Arc<QueryCache>,
}

/// Attach the cookie credential to the request and handle session expiry.
///
/// Responses marked [`SessionExpired`] drop the session's cached reads, get
/// the credential cookie cleared and, unless the UI is already on the login
/// screen, become a `303 See Other` to it. The UI reports its current screen
/// in `X-Current-Path`; without it the request path is used.
pub async fn session_middleware(
    State(layer): State<Arc<SessionLayer>>,
    mut req: Request,
    next: Next,
) -> Response {
    let config = &layer.config;
    let token = read_token(req.headers(), &config.cookie_name);

    let current_path = req
        .headers()
        .get(CURRENT_PATH_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|p| p.starts_with('/'))
        .map(str::to_string)
        .unwrap_or_else(|| req.uri().path().to_string());

    let session = Session::new(token);
    let scope = session.scope();
    req.extensions_mut().insert(session);

    let response = next.run(req).await;

    if response.extensions().get::<SessionExpired>().is_none() {
        return response;
    }

    layer.cache.clear_scope(&scope).await;
    expire_session(config, &current_path, response)
}

fn expire_session(config: &SessionConfig, current_path: &str, response: Response) -> Response {
    let mut response = match on_unauthorized(current_path, &config.login_path) {
        UnauthorizedAction::Redirect(location) => {
            tracing::info!(
                "Session expired on {}, redirecting to {}",
                current_path,
                location
            );
            Redirect::to(&location).into_response()
        }
        UnauthorizedAction::Reject => {
            tracing::debug!("Session expired on login screen, not redirecting");
            response
        }
    };

    for cookie in removal_cookies(config) {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use axum::{routing::get, Router};
    use crate::modules::catalog_api::ApiError;
    use crate::shared::query_cache::QueryKey;
    use axum_test::TestServer;

    fn server_with(cache: Arc<QueryCache>) -> TestServer {
        let app = Router::new()
            .route(
                "/whoami",
                get(|session: Session| async move {
                    if session.is_authenticated() {
                        "signed-in"
                    } else {
                        "anonymous"
                    }
                }),
            )
            .route(
                "/expired",
                get(|| async { AppError::SessionExpired("gone".into()) }),
            )
            .layer(axum::middleware::from_fn_with_state(
                Arc::new(SessionLayer {
                    config: SessionConfig::default(),
                    cache,
                }),
                session_middleware,
            ));
        TestServer::new(app).unwrap()
    }

    fn server() -> TestServer {
        server_with(Arc::new(QueryCache::new(std::time::Duration::from_secs(60))))
    }

    fn set_cookies(response: &axum_test::TestResponse) -> usize {
        response.headers().get_all(header::SET_COOKIE).iter().count()
    }

    #[tokio::test]
    async fn test_cookie_becomes_session() {
        let server = server();

        server
            .get("/whoami")
            .add_header(header::COOKIE, HeaderValue::from_static("auth-token=abc"))
            .await
            .assert_text("signed-in");

        server.get("/whoami").await.assert_text("anonymous");
    }

    #[tokio::test]
    async fn test_expiry_redirects_and_clears_cookies() {
        let response = server()
            .get("/expired")
            .add_header(CURRENT_PATH_HEADER, HeaderValue::from_static("/categories"))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/login");
        assert_eq!(set_cookies(&response), 2);
    }

    #[tokio::test]
    async fn test_expiry_on_login_screen_is_plain_401() {
        let response = server()
            .get("/expired")
            .add_header(CURRENT_PATH_HEADER, HeaderValue::from_static("/login"))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(set_cookies(&response), 2);
    }

    #[tokio::test]
    async fn test_expiry_drops_cached_reads_of_the_session() {
        let cache = Arc::new(QueryCache::new(std::time::Duration::from_secs(60)));
        let scope = Session::new(Some("abc".to_string())).scope();
        cache
            .get_or_fetch(&scope, QueryKey::new(["brands", "list"]), || async {
                Ok::<_, ApiError>(vec![1, 2, 3])
            })
            .await
            .unwrap();
        assert_eq!(cache.len(&scope).await, 1);

        server_with(Arc::clone(&cache))
            .get("/expired")
            .add_header(header::COOKIE, HeaderValue::from_static("auth-token=abc"))
            .await
            .assert_status(StatusCode::SEE_OTHER);

        assert_eq!(cache.len(&scope).await, 0);
    }
}
