//! Catalog API module
//!
//! Typed access to the remote catalog REST service: bearer injection,
//! `{message, data}` envelope unwrapping and failure classification.

mod client;
mod envelope;
mod error;

pub use client::{CatalogClient, QueryParams};
pub use envelope::{error_message, unwrap_envelope};
pub use error::ApiError;
