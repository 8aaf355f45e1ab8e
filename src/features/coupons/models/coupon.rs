use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::{deserialize_id, Filterable, STATUS_ACTIVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Coupon as stored by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub min_order_amount: Option<Decimal>,
    #[serde(default)]
    pub max_uses: Option<i32>,
    #[serde(default)]
    pub used_count: i32,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_status")]
    pub status: i32,
}

fn default_status() -> i32 {
    STATUS_ACTIVE
}

impl Coupon {
    /// Expired coupons stay listed; the UI badges them
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.used_count >= max)
    }
}

impl Filterable for Coupon {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.code]
    }

    fn status_flag(&self) -> Option<i32> {
        Some(self.status)
    }
}
