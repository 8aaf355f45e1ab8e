use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::core::session::Session;
use crate::features::brands::BrandService;
use crate::features::categories::CategoryService;
use crate::features::contact::ContactService;
use crate::features::coupons::CouponService;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::product_types::ProductTypeService;
use crate::features::products::ProductService;
use crate::shared::types::EntityStats;

/// Service for the dashboard landing page
pub struct DashboardService {
    categories: Arc<CategoryService>,
    products: Arc<ProductService>,
    brands: Arc<BrandService>,
    product_types: Arc<ProductTypeService>,
    coupons: Arc<CouponService>,
    contact: Arc<ContactService>,
}

impl DashboardService {
    pub fn new(
        categories: Arc<CategoryService>,
        products: Arc<ProductService>,
        brands: Arc<BrandService>,
        product_types: Arc<ProductTypeService>,
        coupons: Arc<CouponService>,
        contact: Arc<ContactService>,
    ) -> Self {
        Self {
            categories,
            products,
            brands,
            product_types,
            coupons,
            contact,
        }
    }

    /// Fetch every collection's stats concurrently. One failing call only
    /// blanks its own section; an expired session fails the whole summary.
    pub async fn get_summary(&self, session: &Session) -> Result<DashboardSummaryDto> {
        let (categories, products, brands, product_types, coupons, contact) = futures::join!(
            self.categories.stats(session),
            self.products.stats(session),
            self.brands.stats(session),
            self.product_types.stats(session),
            self.coupons.stats(session),
            self.contact.stats(session),
        );

        let mut unavailable = Vec::new();
        let summary = DashboardSummaryDto {
            categories: section("categories", categories, &mut unavailable)?,
            products: section("products", products, &mut unavailable)?,
            brands: section("brands", brands, &mut unavailable)?,
            product_types: section("product_types", product_types, &mut unavailable)?,
            coupons: section("coupons", coupons, &mut unavailable)?,
            contact: section("contact", contact, &mut unavailable)?,
            unavailable,
        };

        Ok(summary)
    }
}

fn section(
    name: &str,
    stats: Result<Value>,
    unavailable: &mut Vec<String>,
) -> Result<Option<EntityStats>> {
    match stats {
        Ok(value) => Ok(Some(EntityStats(value))),
        Err(e @ AppError::SessionExpired(_)) => Err(e),
        Err(e) => {
            tracing::warn!("Dashboard stats for {} unavailable: {}", name, e);
            unavailable.push(name.to_string());
            Ok(None)
        }
    }
}
