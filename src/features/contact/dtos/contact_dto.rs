use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::contact::models::{ContactMessage, ContactStatus};
use crate::shared::constants::DESCRIPTION_PREVIEW_CHARS;
use crate::shared::types::{preview, PaginationQuery};

/// Row of the contact messages table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactMessageRowDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    /// First characters of the message
    pub excerpt: String,
    pub status: ContactStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ContactMessage> for ContactMessageRowDto {
    fn from(m: ContactMessage) -> Self {
        Self {
            excerpt: preview(&m.message, DESCRIPTION_PREVIEW_CHARS),
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

/// Full message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactMessageResponseDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ContactMessage> for ContactMessageResponseDto {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            message: m.message,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

/// Query params for the contact messages table
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ContactListQuery {
    /// Matches name, email, subject and message text
    #[serde(default)]
    pub search: Option<String>,

    /// new | read | replied | archived; omitted for all
    #[serde(default)]
    #[param(inline)]
    pub status: Option<ContactStatus>,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    PaginationQuery::default().page
}

fn default_page_size() -> i64 {
    PaginationQuery::default().page_size
}

impl ContactListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateContactStatusDto {
    pub status: ContactStatus,
}
