use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::types::{deserialize_id, STATUS_ACTIVE};

/// Sellable variant of a product ("Phone X, 128 GB, black")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: String,
    pub sku: String,
    #[serde(default)]
    pub name: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

fn default_status() -> i32 {
    STATUS_ACTIVE
}
