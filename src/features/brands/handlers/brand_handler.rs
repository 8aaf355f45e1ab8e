use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::brands::dtos::{BrandFormDto, BrandResponseDto};
use crate::features::brands::services::BrandService;
use crate::shared::types::{ApiResponse, EntityStats, ListQuery, Meta};

/// List brands
#[utoipa::path(
    get,
    path = "/api/brands",
    params(ListQuery),
    responses(
        (status = 200, description = "List of brands", body = ApiResponse<Vec<BrandResponseDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "brands",
    security(("session_cookie" = []))
)]
pub async fn list_brands(
    RequireSession(session): RequireSession,
    State(service): State<Arc<BrandService>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<BrandResponseDto>>>> {
    let (items, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/brands/stats",
    responses(
        (status = 200, description = "Brand statistics", body = ApiResponse<EntityStats>)
    ),
    tag = "brands",
    security(("session_cookie" = []))
)]
pub async fn get_brand_stats(
    RequireSession(session): RequireSession,
    State(service): State<Arc<BrandService>>,
) -> Result<Json<ApiResponse<EntityStats>>> {
    let stats = service.stats(&session).await?;
    Ok(Json(ApiResponse::success(Some(EntityStats(stats)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    params(("id" = String, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand found", body = ApiResponse<BrandResponseDto>),
        (status = 404, description = "Brand not found")
    ),
    tag = "brands",
    security(("session_cookie" = []))
)]
pub async fn get_brand(
    RequireSession(session): RequireSession,
    State(service): State<Arc<BrandService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BrandResponseDto>>> {
    let brand = service.get(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(brand), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/brands",
    request_body = BrandFormDto,
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<BrandResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "brands",
    security(("session_cookie" = []))
)]
pub async fn create_brand(
    RequireSession(session): RequireSession,
    State(service): State<Arc<BrandService>>,
    AppJson(dto): AppJson<BrandFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<BrandResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let brand = service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(brand),
            Some("Brand created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/brands/{id}",
    params(("id" = String, Path, description = "Brand id")),
    request_body = BrandFormDto,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<BrandResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Brand not found")
    ),
    tag = "brands",
    security(("session_cookie" = []))
)]
pub async fn update_brand(
    RequireSession(session): RequireSession,
    State(service): State<Arc<BrandService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<BrandFormDto>,
) -> Result<Json<ApiResponse<BrandResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let brand = service.update(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(brand),
        Some("Brand updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/brands/{id}",
    params(("id" = String, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand deleted"),
        (status = 404, description = "Brand not found")
    ),
    tag = "brands",
    security(("session_cookie" = []))
)]
pub async fn delete_brand(
    RequireSession(session): RequireSession,
    State(service): State<Arc<BrandService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Brand deleted".to_string()),
        None,
    )))
}
