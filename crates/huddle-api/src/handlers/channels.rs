//! Channel handlers
//!
//! Direct-channel listings and group-channel CRUD. Message creation and
//! deletion happen over the websocket gateway, not here.

use axum::extract::{Path, State};
use huddle_service::dto::{CreateGroupChannelRequest, UpdateGroupChannelRequest};
use huddle_service::ChannelService;
use uuid::Uuid;

use crate::extractors::{AuthUser, GroupChannelPath, Pagination, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Direct channels
// ============================================================================

/// The current user's recent direct channels
///
/// GET /direct-message-channel
pub async fn recent_direct_channels(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .recent_direct_channels(auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// Messages of a direct channel, member-only
///
/// GET /direct-message-channel/:channel_id/message
pub async fn direct_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<Uuid>,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .direct_messages(channel_id, auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

// ============================================================================
// Group channels
// ============================================================================

/// Create a group channel, owner-only
///
/// POST /group-message-channel/:group_id
pub async fn create_group_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateGroupChannelRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .create_group_channel(group_id, auth.user_id, body)
        .await?;
    Ok(Created(ApiJson(response)))
}

/// Active group channels, member-only
///
/// GET /group-message-channel/:group_id
pub async fn list_group_channels(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .list_group_channels(group_id, auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// One group channel, member-only
///
/// GET /group-message-channel/:group_id/:channel_id
pub async fn get_group_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupChannelPath>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .get_group_channel(path.group_id, path.channel_id, auth.user_id)
        .await?;
    Ok(ApiJson(response))
}

/// Rename a group channel, owner-only
///
/// PATCH /group-message-channel/:group_id/:channel_id
pub async fn update_group_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupChannelPath>,
    ValidatedJson(body): ValidatedJson<UpdateGroupChannelRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .update_group_channel(path.group_id, path.channel_id, auth.user_id, body)
        .await?;
    Ok(ApiJson(response))
}

/// Soft-delete a group channel, owner-only
///
/// DELETE /group-message-channel/:group_id/:channel_id
pub async fn delete_group_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupChannelPath>,
) -> ApiResult<impl axum::response::IntoResponse> {
    ChannelService::new(state.service_context())
        .delete_group_channel(path.group_id, path.channel_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Messages of a group channel, member-only
///
/// GET /group-message-channel/:group_id/:channel_id/message
pub async fn group_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupChannelPath>,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = ChannelService::new(state.service_context())
        .group_messages(path.group_id, path.channel_id, auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}
