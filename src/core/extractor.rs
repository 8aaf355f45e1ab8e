use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::core::session::Session;

/// JSON body extractor whose rejections use the API error envelope.
///
/// A body that parses but does not fit the form (wrong type, missing field) is
/// a validation error; anything else is a bad request.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(rejection_error)
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::Validation(err.body_text()),
        JsonRejection::JsonSyntaxError(_) => {
            AppError::BadRequest("Request body is not valid JSON".to_string())
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Expected a JSON request body".to_string())
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Session placed in the request extensions by the session middleware.
/// Anonymous when the middleware did not run or found no cookie.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
    }
}

/// Guard for routes that need a credential.
///
/// A missing token is treated exactly like a 401 from the catalog service.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireSession(session): RequireSession) { ... }
/// ```
pub struct RequireSession(pub Session);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        if !session.is_authenticated() {
            return Err(AppError::SessionExpired("Authentication required".to_string()));
        }
        Ok(RequireSession(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize)]
    struct Form {
        #[allow(dead_code)]
        name: String,
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/form", post(|AppJson(_): AppJson<Form>| async { "ok" }))
            .route("/private", post(|RequireSession(_): RequireSession| async { "ok" }));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_validation_error() {
        let response = server().post("/form").json(&json!({"name": 5})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthorized() {
        server()
            .post("/private")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
