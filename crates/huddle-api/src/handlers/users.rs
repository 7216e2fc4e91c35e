//! User handlers

use axum::extract::{Query, State};
use huddle_service::dto::UpdateProfileRequest;
use huddle_service::UserService;
use serde::Deserialize;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// User search query parameters
#[derive(Debug, Deserialize)]
pub struct UserSearchParams {
    /// Full-name substring filter
    pub q: Option<String>,
}

/// Get the current user
///
/// GET /user/me
pub async fn get_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl axum::response::IntoResponse> {
    let response = UserService::new(state.service_context())
        .me(auth.user_id)
        .await?;
    Ok(ApiJson(response))
}

/// Update the current user's profile
///
/// PATCH /user/me/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = UserService::new(state.service_context())
        .update_profile(auth.user_id, body)
        .await?;
    Ok(ApiJson(response))
}

/// Search the user directory
///
/// GET /user
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<UserSearchParams>,
    Pagination(page): Pagination,
) -> ApiResult<impl axum::response::IntoResponse> {
    let response = UserService::new(state.service_context())
        .search(params.q.as_deref(), page)
        .await?;
    Ok(ApiJson(response))
}
