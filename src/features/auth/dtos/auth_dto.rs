use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::types::deserialize_id;

/// Request DTO for sending a one-time code
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateOtpDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request DTO for signing in with a one-time code
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignInDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 4, max = 8, message = "Code must be 4-8 characters"))]
    pub otp: String,
}

/// Request DTO for creating an admin account with a one-time code
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignUpDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 4, max = 8, message = "Code must be 4-8 characters"))]
    pub otp: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Admin account as returned by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Sign-in/sign-up answer of the catalog service
#[derive(Debug, Clone, Deserialize)]
pub struct IssuedToken {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(default, alias = "admin")]
    pub user: Option<AdminDto>,
}

/// Response DTO for sign-in and sign-up. The token itself only travels in
/// the `HttpOnly` cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub user: Option<AdminDto>,
    /// Cookie lifetime in seconds
    pub expires_in: u64,
}
