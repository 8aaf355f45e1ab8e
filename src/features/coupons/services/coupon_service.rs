use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::core::error::Result;
use crate::core::session::Session;
use crate::features::coupons::dtos::{CouponFormDto, CouponPayload, CouponResponseDto};
use crate::features::coupons::models::Coupon;
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use crate::shared::resource::ResourceService;
use crate::shared::types::{filter_items, paginate, ListQuery, STATUS_ACTIVE};

/// Service for coupon operations
pub struct CouponService {
    resource: ResourceService,
}

impl CouponService {
    pub fn new(client: Arc<CatalogClient>, cache: Arc<QueryCache>) -> Self {
        Self {
            resource: ResourceService::new(client, cache, "/coupons", "coupons"),
        }
    }

    pub async fn list(
        &self,
        session: &Session,
        query: &ListQuery,
    ) -> Result<(Vec<CouponResponseDto>, i64)> {
        let coupons: Vec<Coupon> = self.resource.list(session).await?;
        let filtered = filter_items(coupons, query.search_term(), query.status);
        let (page, total) = paginate(filtered, &query.pagination());

        let now = Utc::now();
        let items = page
            .into_iter()
            .map(|c| CouponResponseDto::from_coupon(c, now))
            .collect();
        Ok((items, total))
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<CouponResponseDto> {
        let coupon: Coupon = self.resource.get(session, id).await?;
        Ok(CouponResponseDto::from_coupon(coupon, Utc::now()))
    }

    pub async fn stats(&self, session: &Session) -> Result<Value> {
        self.resource.stats(session).await
    }

    pub async fn create(&self, session: &Session, dto: CouponFormDto) -> Result<CouponResponseDto> {
        let coupon: Coupon = self.resource.create(session, &Self::payload(dto)).await?;
        tracing::info!("Coupon created: {}", coupon.code);
        Ok(CouponResponseDto::from_coupon(coupon, Utc::now()))
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        dto: CouponFormDto,
    ) -> Result<CouponResponseDto> {
        let coupon: Coupon = self
            .resource
            .update(session, id, &Self::payload(dto))
            .await?;
        Ok(CouponResponseDto::from_coupon(coupon, Utc::now()))
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.resource.delete(session, id).await
    }

    fn payload(dto: CouponFormDto) -> CouponPayload {
        CouponPayload {
            code: dto.code,
            discount_type: dto.discount_type,
            discount_value: dto.discount_value,
            min_order_amount: dto.min_order_amount,
            max_uses: dto.max_uses,
            starts_at: dto.starts_at,
            expires_at: dto.expires_at,
            status: dto.status.unwrap_or(STATUS_ACTIVE),
        }
    }
}
