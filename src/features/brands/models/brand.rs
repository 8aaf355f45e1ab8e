use serde::{Deserialize, Serialize};

use crate::shared::types::{deserialize_id, Filterable, STATUS_ACTIVE};

/// Brand as stored by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_status() -> i32 {
    STATUS_ACTIVE
}

impl Filterable for Brand {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.slug]
    }

    fn status_flag(&self) -> Option<i32> {
        Some(self.status)
    }
}
