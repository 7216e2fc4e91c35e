//! Friend handlers

use axum::extract::{Path, State};
use huddle_service::FriendService;
use uuid::Uuid;

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Send a friend request
///
/// POST /friend/request/:to_user_id
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(to_user_id): Path<Uuid>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = FriendService::new(state.service_context())
        .send_request(auth.user_id, to_user_id)
        .await?;
    Ok(Created(ApiJson(response)))
}

/// Pending requests the current user has sent
///
/// GET /friend/request/from-me
pub async fn list_sent(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = FriendService::new(state.service_context())
        .list_sent(auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// Count of pending requests the current user has sent
///
/// GET /friend/request/count-from-me
pub async fn count_sent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl axum::response::IntoResponse> {
    let count = FriendService::new(state.service_context())
        .count_sent(auth.user_id)
        .await?;
    Ok(ApiJson(count))
}

/// Pending requests the current user has received
///
/// GET /friend/request/to-me
pub async fn list_received(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = FriendService::new(state.service_context())
        .list_received(auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// Count of pending requests the current user has received
///
/// GET /friend/request/count-to-me
pub async fn count_received(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl axum::response::IntoResponse> {
    let count = FriendService::new(state.service_context())
        .count_received(auth.user_id)
        .await?;
    Ok(ApiJson(count))
}

/// Accept a received friend request
///
/// POST /friend/request/:from_user_id/accept
pub async fn accept_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(from_user_id): Path<Uuid>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = FriendService::new(state.service_context())
        .accept_request(from_user_id, auth.user_id)
        .await?;
    Ok(ApiJson(response))
}

/// Decline a received friend request (or withdraw a sent one)
///
/// POST /friend/request/:from_user_id/cancel
pub async fn cancel_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(from_user_id): Path<Uuid>,
) -> ApiResult<impl axum::response::IntoResponse> {
    FriendService::new(state.service_context())
        .decline_request(from_user_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// The current user's friends
///
/// GET /friend
pub async fn list_friends(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = FriendService::new(state.service_context())
        .list_friends(auth.user_id, page)
        .await?;
    Ok(ApiJson(response))
}

/// Remove a friendship
///
/// DELETE /friend/:friend_id
pub async fn unfriend(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(friend_id): Path<Uuid>,
) -> ApiResult<impl axum::response::IntoResponse> {
    FriendService::new(state.service_context())
        .unfriend(auth.user_id, friend_id)
        .await?;
    Ok(NoContent)
}
