use serde::{Deserialize, Serialize};

use crate::shared::types::{deserialize_id, Filterable, STATUS_ACTIVE};

/// Product type: a named template of variant attributes ("size", "color")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default)]
    pub attributes: Vec<String>,
}

fn default_status() -> i32 {
    STATUS_ACTIVE
}

impl Filterable for ProductType {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.slug.as_str()];
        fields.extend(self.attributes.iter().map(String::as_str));
        fields
    }

    fn status_flag(&self) -> Option<i32> {
        Some(self.status)
    }
}
