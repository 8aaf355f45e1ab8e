use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateUrl, ValidationError};

use crate::features::products::models::Product;
use crate::modules::catalog_api::QueryParams;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::{PaginationQuery, StatusFilter, STATUS_ACTIVE, STATUS_INACTIVE};
use crate::shared::validation::{validate_non_negative, validate_not_blank, SLUG_REGEX};

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    /// Price a customer pays right now
    pub effective_price: Decimal,
    pub sku: Option<String>,
    pub stock: i32,
    pub status: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub product_type_id: Option<String>,
    pub images: Vec<String>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            effective_price: p.effective_price(),
            id: p.id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            sale_price: p.sale_price,
            sku: p.sku,
            stock: p.stock,
            status: p.status,
            category_id: p.category_id,
            brand_id: p.brand_id,
            product_type_id: p.product_type_id,
            images: p.images,
        }
    }
}

/// Server-side product filter, forwarded to `GET /products/filter`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductFilterQuery {
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub category_id: Option<String>,

    #[serde(default)]
    pub brand_id: Option<String>,

    #[serde(default)]
    pub product_type_id: Option<String>,

    /// all | active | inactive (default: all)
    #[serde(default)]
    #[param(inline)]
    pub status: StatusFilter,

    #[serde(default)]
    pub min_price: Option<Decimal>,

    #[serde(default)]
    pub max_price: Option<Decimal>,

    /// Page number (1-indexed, default: 1)
    #[serde(default)]
    pub page: Option<i64>,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl ProductFilterQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Query string for the catalog service, camelCase keys, blanks dropped
    pub fn to_upstream(&self) -> QueryParams {
        let mut params: QueryParams = Vec::new();

        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                params.push((key, value.trim().to_string()));
            }
        };

        push("search", self.search.clone());
        push("categoryId", self.category_id.clone());
        push("brandId", self.brand_id.clone());
        push("productTypeId", self.product_type_id.clone());
        push(
            "status",
            match self.status {
                StatusFilter::All => None,
                StatusFilter::Active => Some(STATUS_ACTIVE.to_string()),
                StatusFilter::Inactive => Some(STATUS_INACTIVE.to_string()),
            },
        );
        push("minPrice", self.min_price.map(|p| p.to_string()));
        push("maxPrice", self.max_price.map(|p| p.to_string()));

        let pagination = self.pagination();
        push("page", Some(pagination.page.max(1).to_string()));
        push("pageSize", Some(pagination.limit().to_string()));

        params
    }
}

/// Product form, used for both create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_product_form"))]
pub struct ProductFormDto {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters, digits and single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_non_negative"))]
    pub sale_price: Option<Decimal>,

    #[validate(length(min = 1, max = 64, message = "SKU must be 1-64 characters"))]
    pub sku: Option<String>,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,

    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,

    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub product_type_id: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,
}

fn validate_product_form(form: &ProductFormDto) -> Result<(), ValidationError> {
    if let Some(sale_price) = form.sale_price {
        if sale_price > form.price {
            let mut error = ValidationError::new("sale_price_above_price");
            error.message = Some("Sale price must not exceed the regular price".into());
            return Err(error);
        }
    }
    Ok(())
}

fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    if images.iter().all(|url| url.validate_url()) {
        return Ok(());
    }
    let mut error = ValidationError::new("image_url");
    error.message = Some("Every image must be a valid URL".into());
    Err(error)
}

/// Body sent to the catalog service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock: i32,
    pub status: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub product_type_id: Option<String>,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn form() -> ProductFormDto {
        ProductFormDto {
            name: "Phone X".to_string(),
            slug: None,
            description: None,
            price: Decimal::from_str("499.00").unwrap(),
            sale_price: None,
            sku: Some("PX-128".to_string()),
            stock: Some(10),
            status: None,
            category_id: Some("2".to_string()),
            brand_id: None,
            product_type_id: None,
            images: vec!["https://cdn.example.com/px.png".to_string()],
        }
    }

    #[test]
    fn test_product_form_rules() {
        assert!(form().validate().is_ok());

        let mut f = form();
        f.sale_price = Some(Decimal::from(500));
        assert!(f.validate().is_err());

        let mut f = form();
        f.price = Decimal::from(-1);
        assert!(f.validate().is_err());

        let mut f = form();
        f.images.push("not a url".to_string());
        assert!(f.validate().is_err());

        let mut f = form();
        f.stock = Some(-3);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_filter_query_to_upstream() {
        let query = ProductFilterQuery {
            search: Some(" phone ".to_string()),
            category_id: Some(String::new()),
            brand_id: Some("7".to_string()),
            status: StatusFilter::Inactive,
            min_price: Some(Decimal::from(10)),
            page: Some(2),
            page_size: Some(500),
            ..Default::default()
        };

        assert_eq!(
            query.to_upstream(),
            vec![
                ("search", "phone".to_string()),
                ("brandId", "7".to_string()),
                ("status", "0".to_string()),
                ("minPrice", "10".to_string()),
                ("page", "2".to_string()),
                ("pageSize", "100".to_string()),
            ]
        );
    }
}
