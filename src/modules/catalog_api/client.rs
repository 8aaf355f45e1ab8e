use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::envelope::{error_message, unwrap_envelope};
use super::ApiError;
use crate::core::config::CatalogApiConfig;

/// Query string pairs appended to a request
pub type QueryParams = Vec<(&'static str, String)>;

/// HTTP client for the remote catalog REST service
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogApiConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and unwrap the response envelope into `T`.
    ///
    /// The bearer token is attached when present. A 401 always maps to
    /// [`ApiError::Unauthorized`], whatever the body says.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
        query: QueryParams,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!("Catalog API request: {} {}", method, url);

        let response = request.send().await.map_err(|e| {
            tracing::error!("Catalog API request failed: {} {}: {}", method, url, e);
            if e.is_timeout() {
                ApiError::Transport("request timed out".to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read catalog API response body: {}", e);
            ApiError::Transport(e.to_string())
        })?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Catalog API rejected credentials: {} {}", method, path);
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            });
            tracing::warn!(
                "Catalog API error: {} {} -> HTTP {} - {}",
                method,
                path,
                status,
                message
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                tracing::error!("Catalog API returned invalid JSON for {}: {}", path, e);
                ApiError::Decode(e.to_string())
            })?
        };

        let payload = unwrap_envelope(body)?;

        serde_json::from_value(payload).map_err(|e| {
            tracing::error!("Failed to decode catalog payload for {}: {}", path, e);
            ApiError::Decode(format!("{} {}: {}", method, path, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: QueryParams,
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, token, None, query)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, token, Some(body), Vec::new())
            .await
    }

    pub async fn put<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, token, Some(body), Vec::new())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, path, token, None, Vec::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{spawn_upstream, test_catalog_client};
    use axum::{
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
        Json, Router,
    };
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
        name: String,
    }

    async fn echo_auth(headers: HeaderMap) -> Json<serde_json::Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        Json(json!({"message": "ok", "data": {"id": "1", "name": auth}}))
    }

    fn upstream() -> Router {
        Router::new()
            .route("/items/1", get(echo_auth))
            .route(
                "/items",
                post(|| async {
                    Json(json!({
                        "message": "ok",
                        "data": {"message": "error", "data": "Name already exists"}
                    }))
                }),
            )
            .route(
                "/secret",
                get(|| async {
                    (
                        AxumStatus::UNAUTHORIZED,
                        Json(json!({"message": "Unauthorized", "data": null})),
                    )
                }),
            )
            .route(
                "/conflict",
                get(|| async {
                    (
                        AxumStatus::CONFLICT,
                        Json(json!({"message": "Slug already taken", "data": null})),
                    )
                }),
            )
            .route(
                "/broken",
                get(|| async { (AxumStatus::BAD_GATEWAY, "upstream down") }),
            )
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let base_url = spawn_upstream(upstream()).await;
        let client = test_catalog_client(&base_url);

        let item: Item = client.get("/items/1", Some("tok-123"), Vec::new()).await.unwrap();
        assert_eq!(item.name, "Bearer tok-123");

        let anonymous: Item = client.get("/items/1", None, Vec::new()).await.unwrap();
        assert_eq!(anonymous.name, "");
    }

    #[tokio::test]
    async fn test_business_error_in_envelope() {
        let base_url = spawn_upstream(upstream()).await;
        let client = test_catalog_client(&base_url);

        let result: Result<Item, ApiError> =
            client.post("/items", Some("tok"), &json!({"name": "X"})).await;
        assert_eq!(
            result,
            Err(ApiError::Business("Name already exists".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unauthorized_and_rejected_statuses() {
        let base_url = spawn_upstream(upstream()).await;
        let client = test_catalog_client(&base_url);

        let result: Result<Item, ApiError> = client.get("/secret", Some("old"), Vec::new()).await;
        assert_eq!(result, Err(ApiError::Unauthorized));

        let result: Result<Item, ApiError> = client.get("/conflict", Some("tok"), Vec::new()).await;
        assert_eq!(
            result,
            Err(ApiError::Rejected {
                status: 409,
                message: "Slug already taken".to_string()
            })
        );

        let result: Result<Item, ApiError> = client.get("/broken", Some("tok"), Vec::new()).await;
        assert_eq!(
            result,
            Err(ApiError::Rejected {
                status: 502,
                message: "Bad Gateway".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transport_error_when_unreachable() {
        // port 9 (discard) on localhost is not listening in test environments
        let client = test_catalog_client("http://127.0.0.1:9");
        let result: Result<Item, ApiError> = client.get("/items/1", None, Vec::new()).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
