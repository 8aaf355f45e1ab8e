//! Customer contact messages. Read, triage and delete only; messages are
//! created by the storefront.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ContactService;
