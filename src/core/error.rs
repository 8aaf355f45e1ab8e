use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::catalog_api::ApiError;
use crate::shared::types::ApiResponse;

/// Marker left on 401 responses so the session middleware can clear the
/// credential and redirect
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule violated: {0}")]
    Business(String),

    /// The catalog service answered with a failure status; its message is shown
    #[error("Catalog service error: {0}")]
    UpstreamFailure(String),

    /// No usable answer from the catalog service; details are only logged
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized => {
                AppError::SessionExpired("Your session has expired, please sign in again".into())
            }
            ApiError::Business(message) => AppError::Business(message),
            ApiError::Rejected { status, message } => match status {
                400 => AppError::BadRequest(message),
                403 => AppError::Forbidden(message),
                404 => AppError::NotFound(message),
                409 => AppError::Conflict(message),
                422 => AppError::Business(message),
                _ => AppError::UpstreamFailure(message),
            },
            ApiError::Transport(detail) | ApiError::Decode(detail) => {
                AppError::ExternalServiceError(detail)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let expired = matches!(self, AppError::SessionExpired(_));

        let (status, message, errors) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::SessionExpired(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::Business(ref msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone(), None),
            AppError::UpstreamFailure(ref msg) => {
                tracing::warn!("Catalog service failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None)
            }
            AppError::ExternalServiceError(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "The catalog service could not complete the request".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        let mut response = (status, body).into_response();
        if expired {
            response.extensions_mut().insert(SessionExpired);
        }
        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
