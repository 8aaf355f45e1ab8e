use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::coupons::dtos::{CouponFormDto, CouponResponseDto};
use crate::features::coupons::services::CouponService;
use crate::shared::types::{ApiResponse, EntityStats, ListQuery, Meta};

/// List coupons
#[utoipa::path(
    get,
    path = "/api/coupons",
    params(ListQuery),
    responses(
        (status = 200, description = "List of coupons", body = ApiResponse<Vec<CouponResponseDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "coupons",
    security(("session_cookie" = []))
)]
pub async fn list_coupons(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CouponService>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CouponResponseDto>>>> {
    let (items, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/coupons/stats",
    responses(
        (status = 200, description = "Coupon statistics", body = ApiResponse<EntityStats>)
    ),
    tag = "coupons",
    security(("session_cookie" = []))
)]
pub async fn get_coupon_stats(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CouponService>>,
) -> Result<Json<ApiResponse<EntityStats>>> {
    let stats = service.stats(&session).await?;
    Ok(Json(ApiResponse::success(Some(EntityStats(stats)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/coupons/{id}",
    params(("id" = String, Path, description = "Coupon id")),
    responses(
        (status = 200, description = "Coupon found", body = ApiResponse<CouponResponseDto>),
        (status = 404, description = "Coupon not found")
    ),
    tag = "coupons",
    security(("session_cookie" = []))
)]
pub async fn get_coupon(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CouponService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CouponResponseDto>>> {
    let coupon = service.get(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(coupon), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/coupons",
    request_body = CouponFormDto,
    responses(
        (status = 201, description = "Coupon created", body = ApiResponse<CouponResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Code already in use")
    ),
    tag = "coupons",
    security(("session_cookie" = []))
)]
pub async fn create_coupon(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CouponService>>,
    AppJson(dto): AppJson<CouponFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<CouponResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let coupon = service.create(&session, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(coupon),
            Some("Coupon created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/coupons/{id}",
    params(("id" = String, Path, description = "Coupon id")),
    request_body = CouponFormDto,
    responses(
        (status = 200, description = "Coupon updated", body = ApiResponse<CouponResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Coupon not found")
    ),
    tag = "coupons",
    security(("session_cookie" = []))
)]
pub async fn update_coupon(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CouponService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<CouponFormDto>,
) -> Result<Json<ApiResponse<CouponResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let coupon = service.update(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(coupon),
        Some("Coupon updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/coupons/{id}",
    params(("id" = String, Path, description = "Coupon id")),
    responses(
        (status = 200, description = "Coupon deleted"),
        (status = 404, description = "Coupon not found")
    ),
    tag = "coupons",
    security(("session_cookie" = []))
)]
pub async fn delete_coupon(
    RequireSession(session): RequireSession,
    State(service): State<Arc<CouponService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Coupon deleted".to_string()),
        None,
    )))
}
