use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::core::session::Session;
use crate::features::auth::dtos::{AdminDto, GenerateOtpDto, IssuedToken, SignInDto, SignUpDto};
use crate::modules::catalog_api::{ApiError, CatalogClient};
use crate::shared::query_cache::QueryCache;

/// Service for the OTP login flow and the admin session
pub struct AuthService {
    client: Arc<CatalogClient>,
    cache: Arc<QueryCache>,
    config: Arc<SessionConfig>,
    me_attempts: u32,
}

impl AuthService {
    pub fn new(
        client: Arc<CatalogClient>,
        cache: Arc<QueryCache>,
        config: Arc<SessionConfig>,
        me_attempts: u32,
    ) -> Self {
        Self {
            client,
            cache,
            config,
            me_attempts: me_attempts.max(1),
        }
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.config
    }

    /// Ask the catalog service to email a one-time code
    pub async fn generate_otp(&self, dto: GenerateOtpDto) -> Result<()> {
        let _: Value = self
            .client
            .post("/auth/otp/generate", None, &dto)
            .await
            .map_err(credential_error)?;
        tracing::info!("One-time code requested");
        Ok(())
    }

    pub async fn sign_in(&self, dto: SignInDto) -> Result<IssuedToken> {
        let issued: IssuedToken = self
            .client
            .post("/auth/admin/sign-in/verify-otp", None, &dto)
            .await
            .map_err(credential_error)?;
        tracing::info!("Admin signed in");
        Ok(issued)
    }

    pub async fn sign_up(&self, dto: SignUpDto) -> Result<IssuedToken> {
        let issued: IssuedToken = self
            .client
            .post("/auth/admin/sign-up/verify-otp", None, &dto)
            .await
            .map_err(credential_error)?;
        tracing::info!("Admin account created");
        Ok(issued)
    }

    /// Current admin. A failed check is retried while attempts remain,
    /// except after a 401.
    pub async fn me(&self, session: &Session) -> Result<AdminDto> {
        let mut attempt = 1;
        loop {
            match self.client.get("/auth/me", session.token(), Vec::new()).await {
                Ok(admin) => return Ok(admin),
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
                Err(e) if attempt < self.me_attempts => {
                    tracing::warn!(
                        "Current admin check failed (attempt {}/{}): {}",
                        attempt,
                        self.me_attempts,
                        e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// End the session upstream (best effort) and drop its cached reads
    pub async fn logout(&self, session: &Session) {
        if session.is_authenticated() {
            let result: std::result::Result<Value, ApiError> = self
                .client
                .post("/auth/logout", session.token(), &json!({}))
                .await;
            if let Err(e) = result {
                tracing::warn!("Upstream logout failed, clearing local session anyway: {}", e);
            }
        }

        self.cache.clear_scope(&session.scope()).await;
        tracing::info!("Admin signed out");
    }
}

/// On the credential endpoints a 401 means a wrong or expired code, not an
/// expired session
fn credential_error(e: ApiError) -> AppError {
    match e {
        ApiError::Unauthorized => AppError::BadRequest("Invalid or expired code".to_string()),
        other => other.into(),
    }
}
