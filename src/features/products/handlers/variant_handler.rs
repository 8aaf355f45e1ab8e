use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::products::dtos::{VariantFormDto, VariantResponseDto};
use crate::features::products::services::ProductService;
use crate::shared::types::ApiResponse;

/// List the variants of a product
#[utoipa::path(
    get,
    path = "/api/products/{id}/variants",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Variants of the product", body = ApiResponse<Vec<VariantResponseDto>>),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn list_variants(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<VariantResponseDto>>>> {
    let variants = service.list_variants(&session, &product_id).await?;
    Ok(Json(ApiResponse::success(Some(variants), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/variants",
    params(("id" = String, Path, description = "Product id")),
    request_body = VariantFormDto,
    responses(
        (status = 201, description = "Variant created", body = ApiResponse<VariantResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "SKU already in use")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn create_variant(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path(product_id): Path<String>,
    AppJson(dto): AppJson<VariantFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<VariantResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let variant = service.create_variant(&session, &product_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(variant),
            Some("Variant created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}/variants/{variant_id}",
    params(
        ("id" = String, Path, description = "Product id"),
        ("variant_id" = String, Path, description = "Variant id")
    ),
    request_body = VariantFormDto,
    responses(
        (status = 200, description = "Variant updated", body = ApiResponse<VariantResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Variant not found")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn update_variant(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path((product_id, variant_id)): Path<(String, String)>,
    AppJson(dto): AppJson<VariantFormDto>,
) -> Result<Json<ApiResponse<VariantResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let variant = service
        .update_variant(&session, &product_id, &variant_id, dto)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(variant),
        Some("Variant updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}/variants/{variant_id}",
    params(
        ("id" = String, Path, description = "Product id"),
        ("variant_id" = String, Path, description = "Variant id")
    ),
    responses(
        (status = 200, description = "Variant deleted"),
        (status = 404, description = "Variant not found")
    ),
    tag = "products",
    security(("session_cookie" = []))
)]
pub async fn delete_variant(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ProductService>>,
    Path((product_id, variant_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>> {
    service
        .delete_variant(&session, &product_id, &variant_id)
        .await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Variant deleted".to_string()),
        None,
    )))
}
