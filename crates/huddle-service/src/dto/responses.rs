//! Response DTOs for API endpoints and push payloads
//!
//! All response DTOs implement `Serialize` for JSON output. IDs are
//! serialized as strings. Deleted messages have their `value` masked to the
//! empty string here, at serialization time; nothing else changes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use huddle_core::entities::{
    CallChannel, CallMember, Channel, FriendshipRequest, FriendshipRequestStatus, Group, Message,
    Profile, User,
};
use huddle_core::traits::{MemberPresence, MessageWithAuthor};
use huddle_core::value_objects::Page;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated listing with page/take metadata
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                total,
                page: page.page,
                take: page.take,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub take: i64,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            full_name: profile.full_name.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

/// Profile with live-connection status. The connection id itself never
/// leaves the server; only the boolean does.
#[derive(Debug, Clone, Serialize)]
pub struct UserPresenceResponse {
    pub profile: ProfileResponse,
    pub is_online: bool,
}

impl From<&MemberPresence> for UserPresenceResponse {
    fn from(member: &MemberPresence) -> Self {
        Self {
            profile: ProfileResponse {
                user_id: member.user_id.to_string(),
                full_name: member.full_name.clone(),
                avatar_url: member.avatar_url.clone(),
            },
            is_online: member.is_online(),
        }
    }
}

/// Current authenticated user (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub profile: ProfileResponse,
    pub created_at: DateTime<Utc>,
}

impl CurrentUserResponse {
    pub fn new(user: &User, profile: &Profile) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            profile: ProfileResponse::from(profile),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Friend Responses
// ============================================================================

/// A friendship request row
#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestResponse {
    pub from_user_id: String,
    pub to_user_id: String,
    pub status: FriendshipRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&FriendshipRequest> for FriendRequestResponse {
    fn from(request: &FriendshipRequest) -> Self {
        Self {
            from_user_id: request.from_user_id.to_string(),
            to_user_id: request.to_user_id.to_string(),
            status: request.status,
            created_at: request.created_at,
        }
    }
}

// ============================================================================
// Group Responses
// ============================================================================

/// Group details (member view; includes the invite code)
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub invite_code: String,
    pub invite_code_uses: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code_max_uses: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name.clone(),
            owner_id: group.owner_id.to_string(),
            invite_code: group.invite_code.as_str().to_string(),
            invite_code_uses: group.invite_code_uses,
            invite_code_max_uses: group.invite_code_max_uses,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

/// Group preview shown when checking an invite code (non-member view)
#[derive(Debug, Clone, Serialize)]
pub struct GroupPreviewResponse {
    pub id: String,
    pub name: String,
    pub owner: ProfileResponse,
    pub member_count: i64,
}

/// A group member row: profile + presence + owner flag
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user: UserPresenceResponse,
    pub is_owner: bool,
}

// ============================================================================
// Channel Responses
// ============================================================================

/// Group channel details
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChannelResponse {
    pub fn new(channel: &Channel, last_message: Option<MessageResponse>) -> Self {
        Self {
            id: channel.id.to_string(),
            group_id: channel.group_id.map(|id| id.to_string()),
            name: channel.name.clone(),
            last_message,
            created_at: channel.created_at,
            updated_at: channel.updated_at,
        }
    }
}

/// A row of the recent direct-channel list: the peer and the latest message
#[derive(Debug, Clone, Serialize)]
pub struct DirectChannelResponse {
    pub id: String,
    pub user: UserPresenceResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessageResponse>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// A chat message with its author's profile.
///
/// Construction goes through [`MessageResponse::from_entity`] (or
/// `from_with_author`), which applies the read-time redaction rule.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub channel_id: String,
    pub author: ProfileResponse,
    pub kind: huddle_core::entities::MessageKind,
    pub value: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageResponse {
    /// Build from a message and its author's profile fields, masking the
    /// value when the message is deleted.
    pub fn from_entity(
        message: &Message,
        author_name: &str,
        author_avatar: Option<&str>,
    ) -> Self {
        Self {
            id: message.id.to_string(),
            channel_id: message.channel_id.to_string(),
            author: ProfileResponse {
                user_id: message.author_id.to_string(),
                full_name: author_name.to_string(),
                avatar_url: author_avatar.map(String::from),
            },
            kind: message.kind,
            value: message.redacted_value().to_string(),
            is_deleted: message.is_deleted,
            created_at: message.created_at,
        }
    }

    /// Build from a joined listing row
    pub fn from_with_author(row: &MessageWithAuthor) -> Self {
        Self::from_entity(&row.message, &row.author_name, row.author_avatar.as_deref())
    }
}

/// Deletion push payload: channel id + message id only, no content
#[derive(Debug, Clone, Serialize)]
pub struct MessageDeletedResponse {
    pub channel_id: String,
    pub message_id: String,
}

// ============================================================================
// Call Responses
// ============================================================================

/// A call member's profile as embedded in call payloads
#[derive(Debug, Clone, Serialize)]
pub struct CallMemberResponse {
    pub user_id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<&CallMember> for CallMemberResponse {
    fn from(member: &CallMember) -> Self {
        Self {
            user_id: member.user_id.to_string(),
            full_name: member.full_name.clone(),
            avatar_url: member.avatar_url.clone(),
        }
    }
}

/// A call channel with its member profiles
#[derive(Debug, Clone, Serialize)]
pub struct CallChannelResponse {
    pub id: String,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    pub members: Vec<CallMemberResponse>,
    pub created_at: DateTime<Utc>,
}

impl CallChannelResponse {
    pub fn new(channel: &CallChannel, members: &[CallMember]) -> Self {
        Self {
            id: channel.id.to_string(),
            created_by: channel.created_by.to_string(),
            accepted_at: channel.accepted_at,
            members: members.iter().map(CallMemberResponse::from).collect(),
            created_at: channel.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::entities::MessageKind;
    use uuid::Uuid;

    #[test]
    fn test_deleted_message_value_is_masked() {
        let mut message = Message::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            MessageKind::Text,
            "secret".to_string(),
        );
        message.is_deleted = true;

        let response = MessageResponse::from_entity(&message, "Alice", None);
        assert_eq!(response.value, "");
        assert!(response.is_deleted);
    }

    #[test]
    fn test_live_message_value_passes_through() {
        let message = Message::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            MessageKind::Text,
            "hello".to_string(),
        );

        let response = MessageResponse::from_entity(&message, "Alice", None);
        assert_eq!(response.value, "hello");
        assert!(!response.is_deleted);
    }

    #[test]
    fn test_presence_response_never_carries_ws_id() {
        let member = MemberPresence {
            user_id: Uuid::new_v4(),
            ws_id: Some("s1".to_string()),
            full_name: "Alice".to_string(),
            avatar_url: None,
        };

        let response = UserPresenceResponse::from(&member);
        assert!(response.is_online);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("ws_id").is_none());
    }
}
