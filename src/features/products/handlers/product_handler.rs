use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::products::dtos::{ProductFilterQuery, ProductFormDto, ProductResponseDto};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, EntityStats, ListQuery, Meta};

/// List products, filtered and paginated over the whole collection
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListQuery),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn list_products(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (items, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Filter products on the catalog side
///
/// Search, category, brand, type, status and price bounds are applied by the
/// catalog service, which also paginates.
#[utoipa::path(
    get,
    path = "/api/products/filter",
    params(ProductFilterQuery),
    responses(
        (status = 200, description = "One page of products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn filter_products(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Query(query): Query<ProductFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (items, total) = service.filter(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/products/stats",
    responses(
        (status = 200, description = "Product statistics", body = ApiResponse<EntityStats>)
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn get_product_stats(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<EntityStats>>> {
    let stats = service.stats(&session).await?;
    Ok(Json(ApiResponse::success(Some(EntityStats(stats)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn get_product(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductFormDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn create_product(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<ProductFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductFormDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn update_product(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<ProductFormDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn delete_product(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted".to_string()),
        None,
    )))
}
