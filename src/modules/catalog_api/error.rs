use thiserror::Error;

/// Failure of a call to the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401; the stored credential is no longer accepted
    #[error("Authentication required")]
    Unauthorized,

    /// 2xx response whose envelope carries `message: "error"`
    #[error("{0}")]
    Business(String),

    /// Non-2xx response other than 401
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response (connect error, timeout)
    #[error("Catalog service unavailable: {0}")]
    Transport(String),

    /// The response body did not have the expected shape
    #[error("Unexpected catalog response: {0}")]
    Decode(String),
}
