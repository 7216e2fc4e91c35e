//! Request DTOs with validation
//!
//! REST bodies and websocket command payloads. Validation runs before any
//! service logic.

use huddle_core::entities::MessageKind;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Update the current user's profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(url)]
    pub avatar_url: Option<String>,
}

// ============================================================================
// Group Requests
// ============================================================================

/// Create a new group
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Update a group
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Rotate a group's invite code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInviteCodeRequest {
    #[validate(range(min = 1))]
    pub invite_code_max_uses: Option<i32>,
}

/// Create a group channel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupChannelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Rename a group channel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGroupChannelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

// ============================================================================
// Websocket Command Payloads
// ============================================================================

/// `request-call` payload
#[derive(Debug, Clone, Deserialize)]
pub struct RequestCallData {
    pub to_user_id: Uuid,
}

/// `create-direct-message` payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDirectMessageData {
    pub channel_id: Uuid,
    #[serde(default = "default_kind")]
    pub kind: MessageKind,
    #[validate(length(min = 1, max = 2000))]
    pub value: String,
}

/// `create-group-message` payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupMessageData {
    pub channel_id: Uuid,
    #[serde(default = "default_kind")]
    pub kind: MessageKind,
    #[validate(length(min = 1, max = 2000))]
    pub value: String,
}

/// `delete-direct-message` payload
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteDirectMessageData {
    pub message_id: Uuid,
}

/// `delete-group-message` payload
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteGroupMessageData {
    pub message_id: Uuid,
}

fn default_kind() -> MessageKind {
    MessageKind::Text
}
