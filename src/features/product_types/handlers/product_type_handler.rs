use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::product_types::dtos::{ProductTypeFormDto, ProductTypeResponseDto};
use crate::features::product_types::services::ProductTypeService;
use crate::shared::types::{ApiResponse, EntityStats, ListQuery, Meta};

/// List product types
#[utoipa::path(
    get,
    path = "/api/product-types",
    params(ListQuery),
    responses(
        (status = 200, description = "List of product types", body = ApiResponse<Vec<ProductTypeResponseDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "product-types",
    security(("session_cookie" = []))
)]
pub async fn list_product_types(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductTypeService>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductTypeResponseDto>>>> {
    let (items, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/product-types/stats",
    responses(
        (status = 200, description = "Product type statistics", body = ApiResponse<EntityStats>)
    ),
    tag = "product-types",
    security(("session_cookie" = []))
)]
pub async fn get_product_type_stats(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductTypeService>>,
) -> Result<Json<ApiResponse<EntityStats>>> {
    let stats = service.stats(&session).await?;
    Ok(Json(ApiResponse::success(Some(EntityStats(stats)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/product-types/{id}",
    params(("id" = String, Path, description = "Product type id")),
    responses(
        (status = 200, description = "Product type found", body = ApiResponse<ProductTypeResponseDto>),
        (status = 404, description = "Product type not found")
    ),
    tag = "product-types",
    security(("session_cookie" = []))
)]
pub async fn get_product_type(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductTypeService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductTypeResponseDto>>> {
    let product_type = service.get(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(product_type), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/product-types",
    request_body = ProductTypeFormDto,
    responses(
        (status = 201, description = "Product type created", body = ApiResponse<ProductTypeResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "product-types",
    security(("session_cookie" = []))
)]
pub async fn create_product_type(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductTypeService>>,
    AppJson(dto): AppJson<ProductTypeFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductTypeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product_type = service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product_type),
            Some("Product type created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/product-types/{id}",
    params(("id" = String, Path, description = "Product type id")),
    request_body = ProductTypeFormDto,
    responses(
        (status = 200, description = "Product type updated", body = ApiResponse<ProductTypeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product type not found")
    ),
    tag = "product-types",
    security(("session_cookie" = []))
)]
pub async fn update_product_type(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductTypeService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<ProductTypeFormDto>,
) -> Result<Json<ApiResponse<ProductTypeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product_type = service.update(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product_type),
        Some("Product type updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/product-types/{id}",
    params(("id" = String, Path, description = "Product type id")),
    responses(
        (status = 200, description = "Product type deleted"),
        (status = 404, description = "Product type not found")
    ),
    tag = "product-types",
    security(("session_cookie" = []))
)]
pub async fn delete_product_type(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductTypeService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product type deleted".to_string()),
        None,
    )))
}
