use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::core::session::Session;
use crate::features::categories::dtos::{
    CategoryDeleteDto, CategoryPayload, CategoryResponseDto, CategoryTreeQuery, CreateCategoryDto,
    UpdateCategoryDto,
};
use crate::features::categories::models::{find, would_create_cycle, Category};
use crate::features::categories::tree::{render_tree, CategoryTreeView, TreeFilter};
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::QueryCache;
use crate::shared::resource::ResourceService;
use crate::shared::types::{filter_items, paginate, ListQuery, STATUS_ACTIVE};
use crate::shared::validation::resolve_slug;

const HIERARCHY_PATH: &str = "/categories/hierarchy";

/// Service for category operations
pub struct CategoryService {
    resource: ResourceService,
}

impl CategoryService {
    pub fn new(client: Arc<CatalogClient>, cache: Arc<QueryCache>) -> Self {
        Self {
            resource: ResourceService::new(client, cache, "/categories", "categories"),
        }
    }

    /// Full hierarchy with children materialized by the catalog service
    pub async fn hierarchy(&self, session: &Session) -> Result<Vec<Category>> {
        let key = self.resource.key().child("hierarchy");
        let client = self.resource.client();
        let categories = self
            .resource
            .cache()
            .get_or_fetch(&session.scope(), key, || {
                client.get(HIERARCHY_PATH, session.token(), Vec::new())
            })
            .await?;
        Ok(categories)
    }

    /// Filtered tree view of the hierarchy
    pub async fn tree(&self, session: &Session, query: &CategoryTreeQuery) -> Result<CategoryTreeView> {
        let categories = self.hierarchy(session).await?;
        let filter = TreeFilter::new(query.search.as_deref(), query.status);
        let view = render_tree(&categories, &filter, &query.collapsed_ids());

        tracing::debug!(
            "Rendered category tree: {} of {} nodes visible",
            view.visible_nodes,
            view.total_nodes
        );

        Ok(view)
    }

    /// Flat table view: search, status filter, then one page
    pub async fn list(
        &self,
        session: &Session,
        query: &ListQuery,
    ) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let categories: Vec<Category> = self.resource.list(session).await?;
        let filtered = filter_items(categories, query.search_term(), query.status);
        let (page, total) = paginate(filtered, &query.pagination());
        Ok((page.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<CategoryResponseDto> {
        let category: Category = self.resource.get(session, id).await?;
        Ok(category.into())
    }

    pub async fn stats(&self, session: &Session) -> Result<Value> {
        self.resource.stats(session).await
    }

    pub async fn create(
        &self,
        session: &Session,
        dto: CreateCategoryDto,
    ) -> Result<CategoryResponseDto> {
        let parent_id = dto.parent_id.filter(|id| !id.trim().is_empty());
        if let Some(parent_id) = &parent_id {
            let hierarchy = self.hierarchy(session).await?;
            if find(&hierarchy, parent_id).is_none() {
                return Err(AppError::Validation(format!(
                    "Parent category '{}' does not exist",
                    parent_id
                )));
            }
        }

        let payload = CategoryPayload {
            slug: resolve_slug(dto.slug, &dto.name)?,
            name: dto.name.trim().to_string(),
            parent_id,
            description: dto.description,
            image: dto.image,
            status: dto.status.unwrap_or(STATUS_ACTIVE),
            sort_order: dto.sort_order.unwrap_or(0),
        };

        let created: Category = self.resource.create(session, &payload).await?;
        tracing::info!("Category created: {} ({})", created.name, created.id);
        Ok(created.into())
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        dto: UpdateCategoryDto,
    ) -> Result<CategoryResponseDto> {
        let hierarchy = self.hierarchy(session).await?;
        let existing = find(&hierarchy, id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        let parent_id = match dto.parent_id {
            Some(parent_id) if parent_id.trim().is_empty() => None,
            Some(parent_id) => {
                if find(&hierarchy, &parent_id).is_none() {
                    return Err(AppError::Validation(format!(
                        "Parent category '{}' does not exist",
                        parent_id
                    )));
                }
                if would_create_cycle(&hierarchy, id, &parent_id) {
                    return Err(AppError::Validation(
                        "A category cannot be moved under itself or one of its descendants"
                            .to_string(),
                    ));
                }
                Some(parent_id)
            }
            None => existing.parent_id.clone(),
        };

        let name = dto
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| existing.name.clone());

        let payload = CategoryPayload {
            slug: match dto.slug {
                Some(slug) => resolve_slug(Some(slug), &name)?,
                None => existing.slug.clone(),
            },
            name,
            parent_id,
            description: dto.description.or_else(|| existing.description.clone()),
            image: dto.image.or_else(|| existing.image.clone()),
            status: dto.status.unwrap_or(existing.status),
            sort_order: dto.sort_order.unwrap_or(existing.sort_order),
        };

        let updated: Category = self.resource.update(session, id, &payload).await?;
        Ok(updated.into())
    }

    /// Delete a category. The catalog service removes its descendants too;
    /// the response reports how many went with it.
    pub async fn delete(&self, session: &Session, id: &str) -> Result<CategoryDeleteDto> {
        let hierarchy = self.hierarchy(session).await?;
        let descendants_removed = find(&hierarchy, id)
            .map(Category::descendant_count)
            .unwrap_or(0);

        self.resource.delete(session, id).await?;

        let warning = (descendants_removed > 0).then(|| {
            format!(
                "{} subcategor{} deleted along with this category",
                descendants_removed,
                if descendants_removed == 1 { "y was" } else { "ies were" }
            )
        });
        if let Some(warning) = &warning {
            tracing::warn!("Category {} deleted: {}", id, warning);
        }

        Ok(CategoryDeleteDto {
            id: id.to_string(),
            descendants_removed,
            warning,
        })
    }
}
