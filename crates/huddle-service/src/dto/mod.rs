//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API and websocket inputs
//! - Response DTOs for serializing outputs and push payloads

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateDirectMessageData, CreateGroupChannelRequest, CreateGroupMessageData,
    CreateGroupRequest, CreateInviteCodeRequest, DeleteDirectMessageData, DeleteGroupMessageData,
    RequestCallData, UpdateGroupChannelRequest, UpdateGroupRequest, UpdateProfileRequest,
};

// Re-export commonly used response types
pub use responses::{
    CallChannelResponse, CallMemberResponse, ChannelResponse, CurrentUserResponse,
    DirectChannelResponse, FriendRequestResponse, GroupPreviewResponse, GroupResponse,
    MemberResponse, MessageDeletedResponse, MessageResponse, Paginated, PaginationMeta,
    ProfileResponse, UserPresenceResponse,
};
