//! Group handlers

use axum::extract::{Path, State};
use huddle_service::dto::{CreateGroupRequest, CreateInviteCodeRequest, UpdateGroupRequest};
use huddle_service::GroupService;
use uuid::Uuid;

use crate::extractors::{AuthUser, GroupUserPath, Pagination, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a group
///
/// POST /group
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateGroupRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .create(auth.user_id, body)
        .await?;
    Ok(Created(ApiJson(response)))
}

/// Groups the current user has joined
///
/// GET /group/joined
pub async fn joined_groups(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .joined_list(auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// Group details, member-only
///
/// GET /group/:group_id
pub async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .get(group_id, auth.user_id)
        .await?;
    Ok(ApiJson(response))
}

/// Group member listing, member-only
///
/// GET /group/:group_id/members
pub async fn group_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .member_list(group_id, auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// Rename a group, owner-only
///
/// PATCH /group/:group_id
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateGroupRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .update(group_id, auth.user_id, body)
        .await?;
    Ok(ApiJson(response))
}

/// Remove a member, owner-only
///
/// DELETE /group/:group_id/members/:user_id
pub async fn kick_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupUserPath>,
) -> ApiResult<impl axum::response::IntoResponse> {
    GroupService::new(state.service_context())
        .kick(path.group_id, auth.user_id, path.user_id)
        .await?;
    Ok(NoContent)
}

/// Leave a group
///
/// POST /group/:group_id/leave
pub async fn leave_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl axum::response::IntoResponse> {
    GroupService::new(state.service_context())
        .leave(group_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Rotate the group's invite code, owner-only
///
/// POST /group/:group_id/invite-code
pub async fn create_invite_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateInviteCodeRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .rotate_invite_code(group_id, auth.user_id, body)
        .await?;
    Ok(ApiJson(response))
}

/// Preview a group by invite code
///
/// POST /group/check-invite-code/:invite_code
pub async fn check_invite_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invite_code): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .check_invite_code(&invite_code, auth.user_id)
        .await?;
    Ok(ApiJson(response))
}

/// Join a group by invite code
///
/// POST /group/join/:invite_code
pub async fn join_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invite_code): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = GroupService::new(state.service_context())
        .join(&invite_code, auth.user_id)
        .await?;
    Ok(ApiJson(response))
}
