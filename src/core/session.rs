//! Credential cookie handling.
//!
//! The dashboard keeps exactly one credential: the catalog service's bearer
//! token, stored in a cookie. Requests carry it to the catalog client; a 401
//! anywhere clears it and sends the user to the login screen.

use std::fmt;

use axum::http::{header, HeaderMap};
use cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use sha2::{Digest, Sha256};

use crate::core::config::SessionConfig;
use crate::shared::constants::LEGACY_AUTH_COOKIE_NAME;

/// Cache scope used when a request carries no credential
const ANONYMOUS_SCOPE: &str = "anonymous";

/// Credential attached to the current request, if any
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Stable, non-reversible identifier of this credential for cache
    /// partitioning
    pub fn scope(&self) -> String {
        match &self.token {
            Some(token) => {
                let digest = Sha256::digest(token.as_bytes());
                hex::encode(&digest[..16])
            }
            None => ANONYMOUS_SCOPE.to_string(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Read the credential from the `Cookie` header. The configured name wins;
/// the legacy upper-case name is accepted as a fallback.
pub fn read_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let mut legacy = None;

    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(raw).flatten() {
            if cookie.name() == cookie_name && !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
            if cookie.name() == LEGACY_AUTH_COOKIE_NAME && !cookie.value().is_empty() {
                legacy = Some(cookie.value().to_string());
            }
        }
    }

    legacy
}

/// `Set-Cookie` value storing a freshly issued token
pub fn token_cookie(config: &SessionConfig, token: &str) -> String {
    let max_age = CookieDuration::seconds(config.cookie_max_age.as_secs() as i64);
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
        .to_string()
}

/// `Set-Cookie` values that remove the credential, legacy name included
pub fn removal_cookies(config: &SessionConfig) -> Vec<String> {
    let mut names = vec![config.cookie_name.clone()];
    if config.cookie_name != LEGACY_AUTH_COOKIE_NAME {
        names.push(LEGACY_AUTH_COOKIE_NAME.to_string());
    }

    names
        .into_iter()
        .map(|name| {
            let mut cookie = Cookie::build((name, "")).path("/").build();
            cookie.make_removal();
            cookie.to_string()
        })
        .collect()
}

/// What to do once the catalog service has rejected the credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnauthorizedAction {
    /// Send the user to the login screen
    Redirect(String),
    /// Already on the login screen; report the 401 without redirecting
    Reject,
}

/// The credential is always cleared. Redirect to the login path unless the
/// current path already is (or is below) the login path.
pub fn on_unauthorized(current_path: &str, login_path: &str) -> UnauthorizedAction {
    if current_path.starts_with(login_path) {
        UnauthorizedAction::Reject
    } else {
        UnauthorizedAction::Redirect(login_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_read_token_prefers_canonical_name() {
        let h = headers("theme=dark; AUTH-TOKEN=legacy; auth-token=current");
        assert_eq!(read_token(&h, "auth-token"), Some("current".to_string()));
    }

    #[test]
    fn test_read_token_falls_back_to_legacy_name() {
        let h = headers("AUTH-TOKEN=legacy; theme=dark");
        assert_eq!(read_token(&h, "auth-token"), Some("legacy".to_string()));
    }

    #[test]
    fn test_read_token_ignores_empty_and_missing() {
        assert_eq!(read_token(&headers("auth-token="), "auth-token"), None);
        assert_eq!(read_token(&HeaderMap::new(), "auth-token"), None);
    }

    #[test]
    fn test_unauthorized_redirects_outside_login() {
        assert_eq!(
            on_unauthorized("/categories", "/login"),
            UnauthorizedAction::Redirect("/login".to_string())
        );
        assert_eq!(
            on_unauthorized("/", "/login"),
            UnauthorizedAction::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_unauthorized_on_login_does_not_loop() {
        assert_eq!(on_unauthorized("/login", "/login"), UnauthorizedAction::Reject);
        assert_eq!(
            on_unauthorized("/login/verify", "/login"),
            UnauthorizedAction::Reject
        );
    }

    #[test]
    fn test_token_and_removal_cookies() {
        let config = SessionConfig::default();

        let set = token_cookie(&config, "abc");
        assert!(set.starts_with("auth-token=abc"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Path=/"));

        let removal = removal_cookies(&config);
        assert_eq!(removal.len(), 2);
        assert!(removal[0].starts_with("auth-token="));
        assert!(removal[0].contains("Max-Age=0"));
        assert!(removal[1].starts_with("AUTH-TOKEN="));
    }

    #[test]
    fn test_scope_is_stable_and_hides_token() {
        let a = Session::new(Some("token-a".to_string()));
        let b = Session::new(Some("token-b".to_string()));

        assert_eq!(a.scope(), Session::new(Some("token-a".to_string())).scope());
        assert_ne!(a.scope(), b.scope());
        assert_eq!(a.scope().len(), 32);
        assert!(!a.scope().contains("token-a"));
        assert_eq!(Session::new(Some("  ".to_string())).scope(), ANONYMOUS_SCOPE);
        assert!(!format!("{:?}", a).contains("token-a"));
    }
}
