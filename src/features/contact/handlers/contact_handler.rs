use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, RequireSession};
use crate::features::contact::dtos::{
    ContactListQuery, ContactMessageResponseDto, ContactMessageRowDto, UpdateContactStatusDto,
};
use crate::features::contact::services::ContactService;
use crate::shared::types::{ApiResponse, EntityStats, Meta};

/// List contact messages
#[utoipa::path(
    get,
    path = "/api/contact",
    params(ContactListQuery),
    responses(
        (status = 200, description = "List of contact messages", body = ApiResponse<Vec<ContactMessageRowDto>>),
        (status = 401, description = "Session expired")
    ),
    tag = "contact",
    security(("session_cookie" = []))
)]
pub async fn list_contact_messages(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ContactService>>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<ApiResponse<Vec<ContactMessageRowDto>>>> {
    let (items, total) = service.list(&session, &query).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/contact/stats",
    responses(
        (status = 200, description = "Contact message statistics", body = ApiResponse<EntityStats>)
    ),
    tag = "contact",
    security(("session_cookie" = []))
)]
pub async fn get_contact_stats(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ContactService>>,
) -> Result<Json<ApiResponse<EntityStats>>> {
    let stats = service.stats(&session).await?;
    Ok(Json(ApiResponse::success(Some(EntityStats(stats)), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message found", body = ApiResponse<ContactMessageResponseDto>),
        (status = 404, description = "Message not found")
    ),
    tag = "contact",
    security(("session_cookie" = []))
)]
pub async fn get_contact_message(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ContactMessageResponseDto>>> {
    let message = service.get(&session, &id).await?;
    Ok(Json(ApiResponse::success(Some(message), None, None)))
}

/// Mark a message as read, replied or archived
#[utoipa::path(
    put,
    path = "/api/contact/{id}/status",
    params(("id" = String, Path, description = "Message id")),
    request_body = UpdateContactStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ContactMessageResponseDto>),
        (status = 404, description = "Message not found")
    ),
    tag = "contact",
    security(("session_cookie" = []))
)]
pub async fn update_contact_status(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateContactStatusDto>,
) -> Result<Json<ApiResponse<ContactMessageResponseDto>>> {
    let message = service.update_status(&session, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(message),
        Some("Status updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 404, description = "Message not found")
    ),
    tag = "contact",
    security(("session_cookie" = []))
)]
pub async fn delete_contact_message(
    RequireSession(session): RequireSession,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&session, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Message deleted".to_string()),
        None,
    )))
}
