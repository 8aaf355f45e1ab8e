//! Category management.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Flat, filtered, paginated list |
//! | GET | `/api/categories/tree` | Filtered hierarchy view |
//! | GET | `/api/categories/stats` | Catalog-side statistics |
//! | GET | `/api/categories/{id}` | One category |
//! | POST | `/api/categories` | Create |
//! | PUT | `/api/categories/{id}` | Update, with parent cycle guard |
//! | DELETE | `/api/categories/{id}` | Delete, cascades on the catalog side |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use routes::routes;
pub use services::CategoryService;
