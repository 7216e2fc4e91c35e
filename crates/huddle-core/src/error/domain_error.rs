//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Uuid),

    /// Covers missing, foreign-owned and already-deleted messages alike:
    /// the caller cannot distinguish them.
    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),

    #[error("Friend request not found")]
    FriendRequestNotFound,

    #[error("Friendship not found")]
    FriendshipNotFound,

    #[error("Invite code not found: {0}")]
    InviteCodeNotFound(String),

    // =========================================================================
    // Call Signaling Errors
    // =========================================================================
    #[error("User is offline: {0}")]
    UserOffline(Uuid),

    #[error("User is already in a call: {0}")]
    AlreadyInCall(Uuid),

    #[error("Not in a call")]
    NotInCall,

    #[error("The caller cannot accept their own call")]
    IsCaller,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a channel member")]
    NotChannelMember,

    #[error("Not a group member")]
    NotGroupMember,

    #[error("Not the group owner")]
    NotGroupOwner,

    // =========================================================================
    // Friendship / Group Rule Violations
    // =========================================================================
    #[error("Cannot send a friend request to yourself")]
    CannotBefriendSelf,

    #[error("Friend request already exists")]
    FriendRequestExists,

    #[error("Already a member of this group")]
    AlreadyGroupMember,

    #[error("A user can own at most {max} groups")]
    OwnedGroupLimit { max: i64 },

    #[error("The owner cannot kick themselves")]
    CannotKickSelf,

    #[error("The owner cannot leave while other members remain")]
    OwnerCannotLeave,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses and socket error frames
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::FriendRequestNotFound => "UNKNOWN_FRIEND_REQUEST",
            Self::FriendshipNotFound => "UNKNOWN_FRIENDSHIP",
            Self::InviteCodeNotFound(_) => "UNKNOWN_INVITE_CODE",

            // Call signaling
            Self::UserOffline(_) => "USER_OFFLINE",
            Self::AlreadyInCall(_) => "ALREADY_IN_CALL",
            Self::NotInCall => "NOT_IN_CALL",
            Self::IsCaller => "IS_CALLER",

            // Authorization
            Self::NotChannelMember => "NOT_CHANNEL_MEMBER",
            Self::NotGroupMember => "NOT_GROUP_MEMBER",
            Self::NotGroupOwner => "NOT_GROUP_OWNER",

            // Rule violations
            Self::CannotBefriendSelf => "CANNOT_BEFRIEND_SELF",
            Self::FriendRequestExists => "FRIEND_REQUEST_EXISTS",
            Self::AlreadyGroupMember => "ALREADY_GROUP_MEMBER",
            Self::OwnedGroupLimit { .. } => "OWNED_GROUP_LIMIT",
            Self::CannotKickSelf => "CANNOT_KICK_SELF",
            Self::OwnerCannotLeave => "OWNER_CANNOT_LEAVE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::GroupNotFound(_)
                | Self::FriendRequestNotFound
                | Self::FriendshipNotFound
                | Self::InviteCodeNotFound(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotChannelMember | Self::NotGroupMember | Self::NotGroupOwner
        )
    }

    /// Check if this is a precondition violation of the call/message/group
    /// state machine (maps to 409/400-class responses, never fatal)
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::UserOffline(_)
                | Self::AlreadyInCall(_)
                | Self::NotInCall
                | Self::IsCaller
                | Self::CannotBefriendSelf
                | Self::FriendRequestExists
                | Self::AlreadyGroupMember
                | Self::OwnedGroupLimit { .. }
                | Self::CannotKickSelf
                | Self::OwnerCannotLeave
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
