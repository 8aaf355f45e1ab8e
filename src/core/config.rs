use std::env;
use std::time::Duration;

use crate::shared::constants::{AUTH_COOKIE_NAME, LOGIN_PATH};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub catalog_api: CatalogApiConfig,
    pub session: SessionConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Remote catalog REST service the dashboard is backed by
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// Base URL, e.g. "https://api.example.com/api/v1" (no trailing slash)
    pub base_url: String,
    /// Fixed per-request timeout
    pub timeout: Duration,
    /// Attempts for the current-user check (never retried after a 401)
    pub me_attempts: u32,
}

/// Credential cookie and per-session query cache settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_max_age: Duration,
    pub cookie_secure: bool,
    /// Path of the login screen; 401 responses redirect here
    pub login_path: String,
    /// How long a cached query stays fresh
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            catalog_api: CatalogApiConfig::from_env()?,
            session: SessionConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CatalogApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_ME_ATTEMPTS: u32 = 2;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("CATALOG_API_URL")
            .map_err(|_| "CATALOG_API_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!(
                "CATALOG_API_URL must be an http(s) URL, got '{}'",
                base_url
            ));
        }

        let timeout_secs = env::var("CATALOG_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CATALOG_API_TIMEOUT_SECS must be a valid number".to_string())?;

        let me_attempts = env::var("CATALOG_API_ME_ATTEMPTS")
            .unwrap_or_else(|_| Self::DEFAULT_ME_ATTEMPTS.to_string())
            .parse::<u32>()
            .map_err(|_| "CATALOG_API_ME_ATTEMPTS must be a valid number".to_string())?
            .max(1);

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            me_attempts,
        })
    }
}

impl SessionConfig {
    const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 7 * 24 * 3600; // 7 days
    const DEFAULT_CACHE_TTL_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let cookie_name =
            env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| AUTH_COOKIE_NAME.to_string());

        let cookie_max_age_secs = env::var("AUTH_COOKIE_MAX_AGE_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_COOKIE_MAX_AGE_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "AUTH_COOKIE_MAX_AGE_SECS must be a valid number".to_string())?;

        let cookie_secure = env::var("AUTH_COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        let login_path = env::var("LOGIN_PATH").unwrap_or_else(|_| LOGIN_PATH.to_string());
        if !login_path.starts_with('/') {
            return Err("LOGIN_PATH must start with '/'".to_string());
        }

        let cache_ttl_secs = env::var("QUERY_CACHE_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "QUERY_CACHE_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            cookie_name,
            cookie_max_age: Duration::from_secs(cookie_max_age_secs),
            cookie_secure,
            login_path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: AUTH_COOKIE_NAME.to_string(),
            cookie_max_age: Duration::from_secs(Self::DEFAULT_COOKIE_MAX_AGE_SECS),
            cookie_secure: false,
            login_path: LOGIN_PATH.to_string(),
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Catalog Admin API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Admin dashboard backend for the catalog service".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
