use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::types::StatusFilter;
use crate::shared::validation::{validate_not_blank, SLUG_REGEX};

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: i32,
    pub sort_order: i32,
    /// Direct children, only known when read from the hierarchy
    pub child_count: usize,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            child_count: c.children.len(),
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image: c.image,
            status: c.status,
            sort_order: c.sort_order,
        }
    }
}

/// Query params for the tree view
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CategoryTreeQuery {
    /// Case-insensitive match against name and slug
    #[serde(default)]
    pub search: Option<String>,

    /// all | active | inactive (default: all)
    #[serde(default)]
    #[param(inline)]
    pub status: StatusFilter,

    /// Comma-separated ids of collapsed nodes
    #[serde(default)]
    pub collapsed: Option<String>,
}

impl CategoryTreeQuery {
    pub fn collapsed_ids(&self) -> HashSet<String> {
        self.collapsed
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    /// Derived from the name when omitted
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    /// Parent category; omitted or empty for a root category
    pub parent_id: Option<String>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,

    /// 1 = active (default), 0 = inactive
    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,

    pub sort_order: Option<i32>,
}

/// Request DTO for updating a category. Omitted fields keep their value; an
/// empty `parent_id` moves the category to the root.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    pub parent_id: Option<String>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,

    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,

    pub sort_order: Option<i32>,
}

/// Body sent to the catalog service on create and update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
    pub parent_id: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: i32,
    pub sort_order: i32,
}

/// Outcome of a delete. The catalog service cascades to descendants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDeleteDto {
    pub id: String,
    pub descendants_removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_ids_parsing() {
        let query = CategoryTreeQuery {
            collapsed: Some(" 1, 2,,x9 ".to_string()),
            ..Default::default()
        };
        let ids = query.collapsed_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("x9"));

        assert!(CategoryTreeQuery::default().collapsed_ids().is_empty());
    }

    #[test]
    fn test_create_dto_validation() {
        let valid = CreateCategoryDto {
            name: "Smart Phones".to_string(),
            slug: None,
            parent_id: None,
            description: None,
            image: Some("https://cdn.example.com/phones.png".to_string()),
            status: Some(1),
            sort_order: None,
        };
        assert!(valid.validate().is_ok());

        let bad_slug = CreateCategoryDto {
            slug: Some("Smart Phones".to_string()),
            ..valid.clone()
        };
        assert!(bad_slug.validate().is_err());

        let bad_status = CreateCategoryDto {
            status: Some(2),
            ..valid.clone()
        };
        assert!(bad_status.validate().is_err());

        let empty_name = CreateCategoryDto {
            name: String::new(),
            ..valid.clone()
        };
        assert!(empty_name.validate().is_err());

        let blank_name = CreateCategoryDto {
            name: "   ".to_string(),
            ..valid
        };
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_update_dto_rejects_blank_name() {
        let blank = UpdateCategoryDto {
            name: Some(" \t ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let renamed = UpdateCategoryDto {
            name: Some("Phones".to_string()),
            ..Default::default()
        };
        assert!(renamed.validate().is_ok());
        assert!(UpdateCategoryDto::default().validate().is_ok());
    }
}
