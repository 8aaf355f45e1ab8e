use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::core::session::Session;
use crate::features::products::dtos::{
    ProductFilterQuery, ProductFormDto, ProductPayload, ProductResponseDto, VariantFormDto,
    VariantPayload, VariantResponseDto,
};
use crate::features::products::models::{Product, ProductPage, ProductVariant};
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use crate::shared::resource::ResourceService;
use crate::shared::types::{filter_items, paginate, ListQuery, STATUS_ACTIVE};
use crate::shared::validation::resolve_slug;

/// Service for products and their variants
pub struct ProductService {
    resource: ResourceService,
}

impl ProductService {
    pub fn new(client: Arc<CatalogClient>, cache: Arc<QueryCache>) -> Self {
        Self {
            resource: ResourceService::new(client, cache, "/products", "products"),
        }
    }

    /// Whole collection, filtered and paginated here
    pub async fn list(
        &self,
        session: &Session,
        query: &ListQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let products: Vec<Product> = self.resource.list(session).await?;
        let filtered = filter_items(products, query.search_term(), query.status);
        let (page, total) = paginate(filtered, &query.pagination());
        Ok((page.into_iter().map(Into::into).collect(), total))
    }

    /// One page filtered and paginated by the catalog service
    pub async fn filter(
        &self,
        session: &Session,
        query: &ProductFilterQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let params = query.to_upstream();
        let fingerprint = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let key = self.resource.key().child("filter").child(fingerprint);

        let client = self.resource.client();
        let page: ProductPage = self
            .resource
            .cache()
            .get_or_fetch(&session.scope(), key, || {
                client.get("/products/filter", session.token(), params)
            })
            .await?;

        Ok((page.items.into_iter().map(Into::into).collect(), page.total))
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<ProductResponseDto> {
        let product: Product = self.resource.get(session, id).await?;
        Ok(product.into())
    }

    pub async fn stats(&self, session: &Session) -> Result<Value> {
        self.resource.stats(session).await
    }

    pub async fn create(&self, session: &Session, dto: ProductFormDto) -> Result<ProductResponseDto> {
        let product: Product = self.resource.create(session, &Self::payload(dto)?).await?;
        tracing::info!("Product created: {} ({})", product.name, product.id);
        Ok(product.into())
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        dto: ProductFormDto,
    ) -> Result<ProductResponseDto> {
        let product: Product = self
            .resource
            .update(session, id, &Self::payload(dto)?)
            .await?;
        Ok(product.into())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.resource.delete(session, id).await
    }

    // =========================================================================
    // VARIANTS
    // =========================================================================

    fn variants_path(&self, product_id: &str) -> String {
        format!("{}/variants", self.resource.item_path(product_id))
    }

    fn variant_path(&self, product_id: &str, variant_id: &str) -> String {
        format!(
            "{}/{}",
            self.variants_path(product_id),
            urlencoding::encode(variant_id)
        )
    }

    pub async fn list_variants(
        &self,
        session: &Session,
        product_id: &str,
    ) -> Result<Vec<VariantResponseDto>> {
        let path = self.variants_path(product_id);
        let key = self
            .resource
            .key()
            .child("detail")
            .child(product_id)
            .child("variants");

        let client = self.resource.client();
        let variants: Vec<ProductVariant> = self
            .resource
            .cache()
            .get_or_fetch(&session.scope(), key, || {
                client.get(&path, session.token(), Vec::new())
            })
            .await?;

        Ok(variants.into_iter().map(Into::into).collect())
    }

    pub async fn create_variant(
        &self,
        session: &Session,
        product_id: &str,
        dto: VariantFormDto,
    ) -> Result<VariantResponseDto> {
        let payload = Self::variant_payload(product_id, dto);
        let variant: ProductVariant = self
            .resource
            .client()
            .post(&self.variants_path(product_id), session.token(), &payload)
            .await?;
        tracing::info!("Variant {} added to product {}", variant.sku, product_id);
        self.resource.invalidate().await;
        Ok(variant.into())
    }

    pub async fn update_variant(
        &self,
        session: &Session,
        product_id: &str,
        variant_id: &str,
        dto: VariantFormDto,
    ) -> Result<VariantResponseDto> {
        let payload = Self::variant_payload(product_id, dto);
        let variant: ProductVariant = self
            .resource
            .client()
            .put(
                &self.variant_path(product_id, variant_id),
                session.token(),
                &payload,
            )
            .await?;
        self.resource.invalidate().await;
        Ok(variant.into())
    }

    pub async fn delete_variant(
        &self,
        session: &Session,
        product_id: &str,
        variant_id: &str,
    ) -> Result<()> {
        let _: Value = self
            .resource
            .client()
            .delete(&self.variant_path(product_id, variant_id), session.token())
            .await?;
        tracing::info!("Variant {} removed from product {}", variant_id, product_id);
        self.resource.invalidate().await;
        Ok(())
    }

    fn payload(dto: ProductFormDto) -> Result<ProductPayload> {
        let blank_to_none = |id: Option<String>| id.filter(|v| !v.trim().is_empty());

        Ok(ProductPayload {
            slug: resolve_slug(dto.slug, &dto.name)?,
            name: dto.name.trim().to_string(),
            description: dto.description,
            price: dto.price,
            sale_price: dto.sale_price,
            sku: dto.sku,
            stock: dto.stock.unwrap_or(0),
            status: dto.status.unwrap_or(STATUS_ACTIVE),
            category_id: blank_to_none(dto.category_id),
            brand_id: blank_to_none(dto.brand_id),
            product_type_id: blank_to_none(dto.product_type_id),
            images: dto.images,
        })
    }

    fn variant_payload(product_id: &str, dto: VariantFormDto) -> VariantPayload {
        VariantPayload {
            product_id: product_id.to_string(),
            sku: dto.sku.trim().to_string(),
            name: dto.name,
            price: dto.price,
            stock: dto.stock.unwrap_or(0),
            status: dto.status.unwrap_or(STATUS_ACTIVE),
            attributes: dto.attributes,
        }
    }
}
