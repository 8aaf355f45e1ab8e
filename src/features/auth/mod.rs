//! Admin sign-in with emailed one-time codes.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth/otp/generate` | Email a one-time code |
//! | POST | `/api/auth/sign-in` | Verify the code, set the credential cookie |
//! | POST | `/api/auth/sign-up` | Create an admin account, set the cookie |
//! | GET | `/api/auth/me` | Signed-in admin (session required) |
//! | POST | `/api/auth/logout` | End the session, clear the cookie |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::AuthService;
