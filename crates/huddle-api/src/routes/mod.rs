//! Route definitions
//!
//! REST routes organized by domain, mounted under /api/v1, plus the
//! websocket gateway route.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{channels, friends, groups, health, users};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
        // Websocket gateway (?token=<access token>)
        .route("/gateway", get(huddle_gateway::gateway_handler))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(friend_routes())
        .merge(group_routes())
        .merge(channel_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(users::list_users))
        .route("/user/me", get(users::get_me))
        .route("/user/me/profile", patch(users::update_profile))
}

/// Friend routes
fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/friend", get(friends::list_friends))
        .route("/friend/:friend_id", delete(friends::unfriend))
        .route("/friend/request/from-me", get(friends::list_sent))
        .route("/friend/request/count-from-me", get(friends::count_sent))
        .route("/friend/request/to-me", get(friends::list_received))
        .route("/friend/request/count-to-me", get(friends::count_received))
        .route("/friend/request/:to_user_id", post(friends::create_request))
        .route(
            "/friend/request/:from_user_id/accept",
            post(friends::accept_request),
        )
        .route(
            "/friend/request/:from_user_id/cancel",
            post(friends::cancel_request),
        )
}

/// Group routes
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/group", post(groups::create_group))
        .route("/group/joined", get(groups::joined_groups))
        .route("/group/join/:invite_code", post(groups::join_group))
        .route(
            "/group/check-invite-code/:invite_code",
            post(groups::check_invite_code),
        )
        .route("/group/:group_id", get(groups::get_group))
        .route("/group/:group_id", patch(groups::update_group))
        .route("/group/:group_id/members", get(groups::group_members))
        .route(
            "/group/:group_id/members/:user_id",
            delete(groups::kick_member),
        )
        .route("/group/:group_id/leave", post(groups::leave_group))
        .route(
            "/group/:group_id/invite-code",
            post(groups::create_invite_code),
        )
}

/// Channel routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        // Direct channels
        .route(
            "/direct-message-channel",
            get(channels::recent_direct_channels),
        )
        .route(
            "/direct-message-channel/:channel_id/message",
            get(channels::direct_messages),
        )
        // Group channels
        .route(
            "/group-message-channel/:group_id",
            post(channels::create_group_channel),
        )
        .route(
            "/group-message-channel/:group_id",
            get(channels::list_group_channels),
        )
        .route(
            "/group-message-channel/:group_id/:channel_id",
            get(channels::get_group_channel),
        )
        .route(
            "/group-message-channel/:group_id/:channel_id",
            patch(channels::update_group_channel),
        )
        .route(
            "/group-message-channel/:group_id/:channel_id",
            delete(channels::delete_group_channel),
        )
        .route(
            "/group-message-channel/:group_id/:channel_id/message",
            get(channels::group_messages),
        )
}
