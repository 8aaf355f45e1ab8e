use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::EntityStats;

/// Stats of every catalog collection. A collection whose stats call failed
/// is `null` and listed in `unavailable`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub categories: Option<EntityStats>,
    pub products: Option<EntityStats>,
    pub brands: Option<EntityStats>,
    pub product_types: Option<EntityStats>,
    pub coupons: Option<EntityStats>,
    pub contact: Option<EntityStats>,
    pub unavailable: Vec<String>,
}
