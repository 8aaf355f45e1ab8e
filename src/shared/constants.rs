/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// SESSION CONSTANTS
// =============================================================================

/// Canonical name of the credential cookie
pub const AUTH_COOKIE_NAME: &str = "auth-token";

/// Older dashboard builds wrote the token under this name; accepted on read only
pub const LEGACY_AUTH_COOKIE_NAME: &str = "AUTH-TOKEN";

/// Default login screen path
pub const LOGIN_PATH: &str = "/login";

/// Header the UI uses to tell us which screen issued the request
pub const CURRENT_PATH_HEADER: &str = "x-current-path";

// =============================================================================
// VIEW CONSTANTS
// =============================================================================

/// Descriptions longer than this are truncated in tree and table views
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;
