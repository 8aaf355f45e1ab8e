use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::core::error::AppError;

lazy_static! {
    /// Regex for URL-safe slugs
    /// Lowercase alphanumeric segments separated by single hyphens
    /// - Valid: "electronics", "smart-phones", "tv-2024"
    /// - Invalid: "-tv", "tv-", "smart--phones", "Phones", "smart_phones"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for coupon codes
    /// Uppercase letters, digits, hyphens and underscores
    /// - Valid: "SUMMER24", "BLACK-FRIDAY", "VIP_10"
    /// - Invalid: "summer24", "SUMMER 24", ""
    pub static ref COUPON_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9_-]+$").unwrap();

    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a slug from a display name ("Smart Phones & TVs" -> "smart-phones-tvs")
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Explicit slug if given, otherwise one derived from the name
pub fn resolve_slug(slug: Option<String>, name: &str) -> Result<String, AppError> {
    let slug = slug
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(name));

    if slug.is_empty() {
        return Err(AppError::Validation(
            "Slug could not be derived from the name, please provide one".to_string(),
        ));
    }
    Ok(slug)
}

/// Prices, amounts and discount values can't go below zero
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Value must not be negative".into());
        return Err(error);
    }
    Ok(())
}

/// Names must carry at least one visible character
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Value must not be blank".into());
        return Err(error);
    }
    Ok(())
}
