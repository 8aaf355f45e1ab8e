use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::core::session::Session;
use crate::features::contact::dtos::{
    ContactListQuery, ContactMessageResponseDto, ContactMessageRowDto, UpdateContactStatusDto,
};
use crate::features::contact::models::ContactMessage;
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use crate::shared::resource::ResourceService;
use crate::shared::types::{filter_items, paginate, StatusFilter};

/// Service for customer contact messages. Messages are created by the
/// storefront; staff only read, triage and delete them.
pub struct ContactService {
    resource: ResourceService,
}

impl ContactService {
    pub fn new(client: Arc<CatalogClient>, cache: Arc<QueryCache>) -> Self {
        Self {
            resource: ResourceService::new(client, cache, "/client/contact", "contact"),
        }
    }

    pub async fn list(
        &self,
        session: &Session,
        query: &ContactListQuery,
    ) -> Result<(Vec<ContactMessageRowDto>, i64)> {
        let messages: Vec<ContactMessage> = self.resource.list(session).await?;
        let search = query.search.as_deref().unwrap_or("");

        let filtered: Vec<ContactMessage> = filter_items(messages, search, StatusFilter::All)
            .into_iter()
            .filter(|m| query.status.map_or(true, |status| m.status == status))
            .collect();

        let (page, total) = paginate(filtered, &query.pagination());
        Ok((page.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<ContactMessageResponseDto> {
        let message: ContactMessage = self.resource.get(session, id).await?;
        Ok(message.into())
    }

    pub async fn stats(&self, session: &Session) -> Result<Value> {
        self.resource.stats(session).await
    }

    pub async fn update_status(
        &self,
        session: &Session,
        id: &str,
        dto: UpdateContactStatusDto,
    ) -> Result<ContactMessageResponseDto> {
        let message: ContactMessage = self.resource.update(session, id, &dto).await?;
        tracing::info!("Contact message {} marked {:?}", id, message.status);
        Ok(message.into())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.resource.delete(session, id).await
    }
}
