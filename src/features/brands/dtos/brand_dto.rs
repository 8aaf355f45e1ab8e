use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::brands::models::Brand;
use crate::shared::validation::{validate_not_blank, SLUG_REGEX};

/// Response DTO for brand
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandResponseDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub status: i32,
    pub sort_order: i32,
}

impl From<Brand> for BrandResponseDto {
    fn from(b: Brand) -> Self {
        Self {
            id: b.id,
            name: b.name,
            slug: b.slug,
            description: b.description,
            logo: b.logo,
            website: b.website,
            status: b.status,
            sort_order: b.sort_order,
        }
    }
}

/// Brand form, used for both create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BrandFormDto {
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

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    /// 1 = active (default), 0 = inactive
    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,

    pub sort_order: Option<i32>,
}

/// Body sent to the catalog service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPayload {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub status: i32,
    pub sort_order: i32,
}
