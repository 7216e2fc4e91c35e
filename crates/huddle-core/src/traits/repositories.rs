//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    CallChannel, CallMember, Channel, FriendshipRequest, Group, GroupMember, Message, Profile,
    User,
};
use crate::error::DomainError;
use crate::value_objects::Page;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// A channel/group member's profile joined with their presence column.
///
/// This is the unit of fan-out: `ws_id` is the member's live connection id,
/// `None` when offline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPresence {
    pub user_id: Uuid,
    pub ws_id: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl MemberPresence {
    #[inline]
    pub fn is_online(&self) -> bool {
        self.ws_id.is_some()
    }
}

/// A message joined with its author's profile, as listings return it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithAuthor {
    pub message: Message,
    pub author_name: String,
    pub author_avatar: Option<String>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Get a user's profile
    async fn find_profile(&self, user_id: Uuid) -> RepoResult<Option<Profile>>;

    /// Create a new user with their profile
    async fn create(&self, user: &User, profile: &Profile) -> RepoResult<()>;

    /// Update a user's profile
    async fn update_profile(&self, profile: &Profile) -> RepoResult<()>;

    /// Search profiles by full-name substring, with presence
    async fn search_profiles(
        &self,
        query: Option<&str>,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)>;

    /// Bind a live connection id to the user. Unconditional overwrite:
    /// concurrent connects race by design and the last write wins.
    async fn bind_connection(&self, user_id: Uuid, ws_id: &str) -> RepoResult<()>;

    /// Clear the user's connection id, but only when it still equals
    /// `ws_id`. Returns whether a row was cleared, so a stale disconnect
    /// from an old socket cannot clobber a newer binding.
    async fn release_connection(&self, user_id: Uuid, ws_id: &str) -> RepoResult<bool>;

    /// Null every `ws_id`. Run at boot: no live connection can exist yet.
    async fn reset_all_connections(&self) -> RepoResult<u64>;
}

// ============================================================================
// Friend Repository
// ============================================================================

#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Find any request linking the pair, in either direction
    async fn find_request_between(&self, a: Uuid, b: Uuid)
        -> RepoResult<Option<FriendshipRequest>>;

    /// Create a new pending request
    async fn create_request(&self, request: &FriendshipRequest) -> RepoResult<()>;

    /// Pending requests sent by the user (recipient profiles)
    async fn list_requests_from(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)>;

    /// Pending requests received by the user (sender profiles)
    async fn list_requests_to(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)>;

    /// Count pending requests sent by the user
    async fn count_requests_from(&self, user_id: Uuid) -> RepoResult<i64>;

    /// Count pending requests received by the user
    async fn count_requests_to(&self, user_id: Uuid) -> RepoResult<i64>;

    /// Accept a pending request: flip its status and create the two
    /// reciprocal friendship rows, atomically.
    async fn accept_request(&self, from_user_id: Uuid, to_user_id: Uuid) -> RepoResult<()>;

    /// Delete any pending request between the pair. Returns rows removed.
    async fn delete_pending_between(&self, a: Uuid, b: Uuid) -> RepoResult<u64>;

    /// Whether a friendship edge exists from `from` to `to`
    async fn friendship_exists(&self, from_user_id: Uuid, to_user_id: Uuid) -> RepoResult<bool>;

    /// The user's friends with profile and presence
    async fn list_friends(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MemberPresence>, i64)>;

    /// Delete both friendship directions and any requests for the pair,
    /// atomically.
    async fn delete_friendship_pair(&self, a: Uuid, b: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Group>>;

    /// Find group by its current invite code
    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Group>>;

    /// Number of groups the user owns
    async fn count_owned(&self, user_id: Uuid) -> RepoResult<i64>;

    /// Create the group together with its owner membership row, atomically
    async fn create(&self, group: &Group, owner: &GroupMember) -> RepoResult<()>;

    /// Update the group's name
    async fn update(&self, group: &Group) -> RepoResult<()>;

    /// Persist a rotated invite code (code, uses, max uses)
    async fn update_invite_code(&self, group: &Group) -> RepoResult<()>;

    /// Increment the invite code use counter
    async fn increment_invite_uses(&self, group_id: Uuid) -> RepoResult<()>;

    /// Find a membership row
    async fn find_membership(&self, group_id: Uuid, user_id: Uuid)
        -> RepoResult<Option<GroupMember>>;

    /// Add a member
    async fn add_member(&self, member: &GroupMember) -> RepoResult<()>;

    /// Remove a member
    async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> RepoResult<()>;

    /// Number of members in the group
    async fn member_count(&self, group_id: Uuid) -> RepoResult<i64>;

    /// Groups the user has joined
    async fn list_joined(&self, user_id: Uuid, page: Page) -> RepoResult<(Vec<Group>, i64)>;

    /// Member listing with profile, presence and owner flag, owner first
    async fn list_members(
        &self,
        group_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<(MemberPresence, bool)>, i64)>;

    /// All members with presence, un-paged. This is the fan-out set for
    /// group messages.
    async fn members_presence(&self, group_id: Uuid) -> RepoResult<Vec<MemberPresence>>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID (group channels: including soft-deleted)
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Channel>>;

    /// Find the direct channel between two users
    async fn find_direct_between(&self, a: Uuid, b: Uuid) -> RepoResult<Option<Channel>>;

    /// Create a direct channel with its two membership rows, atomically
    async fn create_direct(&self, channel: &Channel, a: Uuid, b: Uuid) -> RepoResult<()>;

    /// Whether the user holds a membership row in the direct channel
    async fn is_direct_member(&self, channel_id: Uuid, user_id: Uuid) -> RepoResult<bool>;

    /// Both members of a direct channel with presence. This is the fan-out
    /// set for direct messages.
    async fn direct_members(&self, channel_id: Uuid) -> RepoResult<Vec<MemberPresence>>;

    /// The user's direct channels that contain at least one message,
    /// newest `updated_at` first
    async fn list_recent_direct(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<Channel>, i64)>;

    /// Create a group channel
    async fn create_group_channel(&self, channel: &Channel) -> RepoResult<()>;

    /// Find a group channel by group and id, excluding soft-deleted
    async fn find_group_channel(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
    ) -> RepoResult<Option<Channel>>;

    /// Active group channels of a group
    async fn list_group_channels(
        &self,
        group_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<Channel>, i64)>;

    /// Rename a group channel
    async fn update_group_channel(&self, channel: &Channel) -> RepoResult<()>;

    /// Soft-delete a group channel
    async fn soft_delete_group_channel(&self, channel_id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>>;

    /// Find a message only when it exists, belongs to `author_id` and is
    /// not already deleted. One lookup backs the delete precondition.
    async fn find_owned_active(&self, id: Uuid, author_id: Uuid) -> RepoResult<Option<Message>>;

    /// Persist a direct message and bump its channel's `updated_at` in the
    /// same transaction, so the recent-channel ordering can never observe
    /// one without the other.
    async fn create_direct(&self, message: &Message) -> RepoResult<()>;

    /// Persist a group message (no `updated_at` bump)
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Soft-delete a message
    async fn mark_deleted(&self, id: Uuid) -> RepoResult<()>;

    /// Messages of a channel with author profiles, newest first
    async fn list_by_channel(
        &self,
        channel_id: Uuid,
        page: Page,
    ) -> RepoResult<(Vec<MessageWithAuthor>, i64)>;

    /// The channel's most recent message, if any
    async fn last_in_channel(&self, channel_id: Uuid) -> RepoResult<Option<MessageWithAuthor>>;
}

// ============================================================================
// Call Repository
// ============================================================================

#[async_trait]
pub trait CallRepository: Send + Sync {
    /// The call channel the user is currently a member of, if any
    async fn find_by_member(&self, user_id: Uuid) -> RepoResult<Option<CallChannel>>;

    /// Create the call channel with both membership rows, atomically.
    ///
    /// The membership table carries a UNIQUE constraint on the user id, so
    /// two racing admissions cannot both commit; the violation surfaces as
    /// `DomainError::AlreadyInCall`.
    async fn create(&self, channel: &CallChannel, caller: Uuid, callee: Uuid) -> RepoResult<()>;

    /// Members of the call with presence and profile
    async fn members(&self, channel_id: Uuid) -> RepoResult<Vec<CallMember>>;

    /// Record acceptance
    async fn set_accepted(&self, channel_id: Uuid, at: DateTime<Utc>) -> RepoResult<()>;

    /// Delete the call channel (memberships cascade)
    async fn delete(&self, channel_id: Uuid) -> RepoResult<()>;

    /// Delete every call channel. Run at boot: no call can outlive the
    /// connections it was signaled over.
    async fn delete_all(&self) -> RepoResult<u64>;
}
