use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::core::session::{removal_cookies, token_cookie, Session};
use crate::features::auth::dtos::{
    AdminDto, GenerateOtpDto, IssuedToken, SessionDto, SignInDto, SignUpDto,
};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Email a one-time sign-in code
#[utoipa::path(
    post,
    path = "/api/auth/otp/generate",
    request_body = GenerateOtpDto,
    responses(
        (status = 200, description = "Code sent"),
        (status = 400, description = "Invalid email")
    ),
    tag = "auth"
)]
pub async fn generate_otp(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<GenerateOtpDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.generate_otp(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("A sign-in code has been sent to your email".to_string()),
        None,
    )))
}

/// Sign in with a one-time code. The issued token is stored in an
/// `HttpOnly` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in, credential cookie set", body = ApiResponse<SessionDto>),
        (status = 400, description = "Invalid or expired code")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignInDto>,
) -> Result<impl IntoResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let issued = service.sign_in(dto).await?;
    Ok(start_session(&service, issued))
}

/// Create an admin account with a one-time code and sign in
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpDto,
    responses(
        (status = 200, description = "Account created, credential cookie set", body = ApiResponse<SessionDto>),
        (status = 400, description = "Invalid or expired code")
    ),
    tag = "auth"
)]
pub async fn sign_up(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignUpDto>,
) -> Result<impl IntoResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let issued = service.sign_up(dto).await?;
    Ok(start_session(&service, issued))
}

fn start_session(service: &AuthService, issued: IssuedToken) -> impl IntoResponse {
    let config = service.session_config();
    let cookie = token_cookie(config, &issued.token);
    let body = SessionDto {
        user: issued.user,
        expires_in: config.cookie_max_age.as_secs(),
    };

    (
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(Some(body), None, None)),
    )
}

/// Get the signed-in admin
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current admin", body = ApiResponse<AdminDto>),
        (status = 401, description = "Session expired")
    ),
    tag = "auth",
    security(("session_cookie" = []))
)]
pub async fn get_me(
    RequireSession(session): RequireSession,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AdminDto>>> {
    let admin = service.me(&session).await?;
    Ok(Json(ApiResponse::success(Some(admin), None, None)))
}

/// Sign out: ends the upstream session, drops cached reads and clears the
/// credential cookie. Succeeds without a session too.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out")
    ),
    tag = "auth"
)]
pub async fn logout(
    session: Session,
    State(service): State<Arc<AuthService>>,
) -> impl IntoResponse {
    service.logout(&session).await;

    let cookies = removal_cookies(service.session_config())
        .into_iter()
        .map(|cookie| (header::SET_COOKIE, cookie));

    (
        AppendHeaders(cookies),
        Json(ApiResponse::<()>::success(
            None,
            Some("Signed out".to_string()),
            None,
        )),
    )
}
