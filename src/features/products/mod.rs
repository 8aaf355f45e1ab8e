//! Products and their variants.
//!
//! Two list flavours exist: `/api/products` filters the whole collection
//! here, `/api/products/filter` lets the catalog service filter and paginate.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ProductService;
