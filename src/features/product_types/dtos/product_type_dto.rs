use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::product_types::models::ProductType;
use crate::shared::validation::{validate_not_blank, SLUG_REGEX};

/// Response DTO for product type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductTypeResponseDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: i32,
    pub attributes: Vec<String>,
}

impl From<ProductType> for ProductTypeResponseDto {
    fn from(t: ProductType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            slug: t.slug,
            description: t.description,
            status: t.status,
            attributes: t.attributes,
        }
    }
}

/// Product type form, used for both create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductTypeFormDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,

    /// Attribute names variants of this type carry
    #[serde(default)]
    #[validate(custom(function = "validate_attribute_names"))]
    pub attributes: Vec<String>,
}

fn validate_attribute_names(attributes: &[String]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for attribute in attributes {
        let name = attribute.trim().to_lowercase();
        if name.is_empty() {
            let mut error = ValidationError::new("attribute_blank");
            error.message = Some("Attribute names must not be blank".into());
            return Err(error);
        }
        if !seen.insert(name) {
            let mut error = ValidationError::new("attribute_duplicate");
            error.message = Some(format!("Duplicate attribute '{}'", attribute.trim()).into());
            return Err(error);
        }
    }
    Ok(())
}

/// Body sent to the catalog service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypePayload {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: i32,
    pub attributes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(attributes: &[&str]) -> ProductTypeFormDto {
        ProductTypeFormDto {
            name: "Apparel".to_string(),
            slug: None,
            description: None,
            status: None,
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_attribute_names_validation() {
        assert!(form(&["size", "color"]).validate().is_ok());
        assert!(form(&[]).validate().is_ok());
        assert!(form(&["size", " "]).validate().is_err());
        assert!(form(&["Size", "size"]).validate().is_err());
    }
}
