use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::core::session::Session;
use crate::features::product_types::dtos::{
    ProductTypeFormDto, ProductTypePayload, ProductTypeResponseDto,
};
use crate::features::product_types::models::ProductType;
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use crate::shared::resource::ResourceService;
use crate::shared::types::{filter_items, paginate, ListQuery, STATUS_ACTIVE};
use crate::shared::validation::resolve_slug;

/// Service for product type operations
pub struct ProductTypeService {
    resource: ResourceService,
}

impl ProductTypeService {
    pub fn new(client: Arc<CatalogClient>, cache: Arc<QueryCache>) -> Self {
        Self {
            resource: ResourceService::new(client, cache, "/product-types", "product_types"),
        }
    }

    pub async fn list(
        &self,
        session: &Session,
        query: &ListQuery,
    ) -> Result<(Vec<ProductTypeResponseDto>, i64)> {
        let types: Vec<ProductType> = self.resource.list(session).await?;
        let filtered = filter_items(types, query.search_term(), query.status);
        let (page, total) = paginate(filtered, &query.pagination());
        Ok((page.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<ProductTypeResponseDto> {
        let product_type: ProductType = self.resource.get(session, id).await?;
        Ok(product_type.into())
    }

    pub async fn stats(&self, session: &Session) -> Result<Value> {
        self.resource.stats(session).await
    }

    pub async fn create(
        &self,
        session: &Session,
        dto: ProductTypeFormDto,
    ) -> Result<ProductTypeResponseDto> {
        let payload = Self::payload(dto)?;
        let product_type: ProductType = self.resource.create(session, &payload).await?;
        Ok(product_type.into())
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        dto: ProductTypeFormDto,
    ) -> Result<ProductTypeResponseDto> {
        let payload = Self::payload(dto)?;
        let product_type: ProductType = self.resource.update(session, id, &payload).await?;
        Ok(product_type.into())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.resource.delete(session, id).await
    }

    fn payload(dto: ProductTypeFormDto) -> Result<ProductTypePayload> {
        Ok(ProductTypePayload {
            slug: resolve_slug(dto.slug, &dto.name)?,
            name: dto.name.trim().to_string(),
            description: dto.description,
            status: dto.status.unwrap_or(STATUS_ACTIVE),
            attributes: dto
                .attributes
                .into_iter()
                .map(|a| a.trim().to_string())
                .collect(),
        })
    }
}
