use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::categories::dtos::{
    CategoryDeleteDto, CategoryResponseDto, CategoryTreeQuery, CreateCategoryDto,
    UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::features::categories::tree::CategoryTreeView;
use crate::shared::types::{ApiResponse, EntityStats, ListQuery, Meta};

/// Render the category hierarchy as a filtered tree
///
/// A node is listed when it matches the search and status filter itself, or
/// when one of its direct children does. Ids in `collapsed` list no children.
#[utoipa::path(
    get,
    path = "/api/categories/tree",
    params(CategoryTreeQuery),
    responses(
        (status = 200, description = "Category tree view", body = ApiResponse<CategoryTreeView>),
        (status = 401, description = "Session expired")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn get_category_tree(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<CategoryTreeQuery>,
) -> Result<Json<ApiResponse<CategoryTreeView>>> {
    let view = service.tree(&session, &query).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// List categories as a flat, paginated table
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn list_categories(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (items, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Category statistics as computed by the catalog service
#[utoipa::path(
    get,
    path = "/api/categories/stats",
    responses(
        (status = 200, description = "Category statistics", body = ApiResponse<EntityStats>),
        (status = 401, description = "Session expired")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn get_category_stats(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<EntityStats>>> {
    let stats = service.stats(&session).await?;
    Ok(Json(ApiResponse::success(Some(EntityStats(stats)), None, None)))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn get_category(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn create_category(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created".to_string()),
            None,
        )),
    ))
}

/// Update a category
///
/// Moving a category under itself or one of its descendants is rejected.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn update_category(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated".to_string()),
        None,
    )))
}

/// Delete a category and, on the catalog side, all of its descendants
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<CategoryDeleteDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("session_cookie" = []))
)]
pub async fn delete_category(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryDeleteDto>>> {
    let outcome = service.delete(&session, &id).await?;
    let message = outcome
        .warning
        .clone()
        .unwrap_or_else(|| "Category deleted".to_string());
    Ok(Json(ApiResponse::success(Some(outcome), Some(message), None)))
}
