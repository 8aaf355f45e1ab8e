use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::types::{deserialize_id, Filterable};

/// Triage state of a customer message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

/// Message submitted through the storefront contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Filterable for ContactMessage {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.message.as_str()];
        fields.extend(self.subject.as_deref());
        fields
    }

    // triage status is not a binary flag; filtered separately
    fn status_flag(&self) -> Option<i32> {
        None
    }
}
