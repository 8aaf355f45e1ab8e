use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::products::models::ProductVariant;
use crate::shared::validation::validate_non_negative;

/// Response DTO for product variant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariantResponseDto {
    pub id: String,
    pub product_id: String,
    pub sku: String,
    pub name: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub status: i32,
    pub attributes: BTreeMap<String, String>,
}

impl From<ProductVariant> for VariantResponseDto {
    fn from(v: ProductVariant) -> Self {
        Self {
            id: v.id,
            product_id: v.product_id,
            sku: v.sku,
            name: v.name,
            price: v.price,
            stock: v.stock,
            status: v.status,
            attributes: v.attributes,
        }
    }
}

/// Variant form, used for both create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VariantFormDto {
    #[validate(length(min = 1, max = 64, message = "SKU must be 1-64 characters"))]
    pub sku: String,

    #[validate(length(max = 200, message = "Name must not exceed 200 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,

    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,

    /// Attribute values keyed by the product type's attribute names
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Body sent to the catalog service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    pub product_id: String,
    pub sku: String,
    pub name: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub status: i32,
    pub attributes: BTreeMap<String, String>,
}
