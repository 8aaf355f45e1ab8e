use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::RequireSession;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get the dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Session expired")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_summary(
    RequireSession(session): RequireSession,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = service.get_summary(&session).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
