use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::core::session::Session;
use crate::features::brands::dtos::{BrandFormDto, BrandPayload, BrandResponseDto};
use crate::features::brands::models::Brand;
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use crate::shared::resource::ResourceService;
use crate::shared::types::{filter_items, paginate, ListQuery, STATUS_ACTIVE};
use crate::shared::validation::resolve_slug;

/// Service for brand operations
pub struct BrandService {
    resource: ResourceService,
}

impl BrandService {
    pub fn new(client: Arc<CatalogClient>, cache: Arc<QueryCache>) -> Self {
        Self {
            resource: ResourceService::new(client, cache, "/brands", "brands"),
        }
    }

    pub async fn list(
        &self,
        session: &Session,
        query: &ListQuery,
    ) -> Result<(Vec<BrandResponseDto>, i64)> {
        let brands: Vec<Brand> = self.resource.list(session).await?;
        let filtered = filter_items(brands, query.search_term(), query.status);
        let (page, total) = paginate(filtered, &query.pagination());
        Ok((page.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<BrandResponseDto> {
        let brand: Brand = self.resource.get(session, id).await?;
        Ok(brand.into())
    }

    pub async fn stats(&self, session: &Session) -> Result<Value> {
        self.resource.stats(session).await
    }

    pub async fn create(&self, session: &Session, dto: BrandFormDto) -> Result<BrandResponseDto> {
        let payload = Self::payload(dto)?;
        let brand: Brand = self.resource.create(session, &payload).await?;
        Ok(brand.into())
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        dto: BrandFormDto,
    ) -> Result<BrandResponseDto> {
        let payload = Self::payload(dto)?;
        let brand: Brand = self.resource.update(session, id, &payload).await?;
        Ok(brand.into())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.resource.delete(session, id).await
    }

    fn payload(dto: BrandFormDto) -> Result<BrandPayload> {
        Ok(BrandPayload {
            slug: resolve_slug(dto.slug, &dto.name)?,
            name: dto.name.trim().to_string(),
            description: dto.description,
            logo: dto.logo,
            website: dto.website,
            status: dto.status.unwrap_or(STATUS_ACTIVE),
            sort_order: dto.sort_order.unwrap_or(0),
        })
    }
}
