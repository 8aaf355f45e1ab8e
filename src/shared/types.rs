use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

/// Statistics whose shape is owned by the catalog service, passed through
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityStats(pub serde_json::Value);

// =============================================================================
// STATUS
// =============================================================================

/// Binary status flag used by most catalog entities
pub const STATUS_ACTIVE: i32 = 1;
pub const STATUS_INACTIVE: i32 = 0;

/// Three-way filter over the binary `status` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(self, status: i32) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == STATUS_ACTIVE,
            StatusFilter::Inactive => status == STATUS_INACTIVE,
        }
    }
}

/// Case-insensitive substring search; an empty term matches everything
pub fn matches_search(term: &str, haystacks: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    haystacks
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Entities that can be searched and status-filtered in table views
pub trait Filterable {
    /// Fields the free-text search looks at
    fn search_fields(&self) -> Vec<&str>;

    /// Binary status, if the entity has one
    fn status_flag(&self) -> Option<i32>;
}

/// Apply the table-view search and status filter, keeping server order
pub fn filter_items<T: Filterable>(items: Vec<T>, search: &str, status: StatusFilter) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| matches_search(search, &item.search_fields()))
        .filter(|item| item.status_flag().map_or(true, |flag| status.matches(flag)))
        .collect()
}

/// Shorten free text for list and tree views, appending "..." when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// The catalog service emits ids as strings or integers depending on the
/// collection; both are kept as opaque strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(RawId::into_string)
        .filter(|id| !id.is_empty()))
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for all list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Items to skip; saturates instead of overflowing on absurd page numbers
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Table-view query: free-text search, status filter and page window
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring match against the entity's text fields
    #[serde(default)]
    pub search: Option<String>,

    /// all | active | inactive (default: all)
    #[serde(default)]
    #[param(inline)]
    pub status: StatusFilter,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl ListQuery {
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Slice one page out of an already filtered list. Returns the page and the
/// total number of items before slicing.
pub fn paginate<T>(items: Vec<T>, pagination: &PaginationQuery) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let page = items
        .into_iter()
        .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(pagination.limit()).unwrap_or(usize::MAX))
        .collect();
    (page, total)
}
