//! # huddle-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! websocket event names. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CallChannel, CallMember, Channel, ChannelKind, Friendship, FriendshipRequest,
    FriendshipRequestStatus, Group, GroupMember, Message, MessageKind, Profile, User,
};
pub use error::DomainError;
pub use events::WsEvent;
pub use traits::{
    CallRepository, ChannelRepository, ConnectionPush, FriendRepository, GroupRepository,
    MemberPresence, MessageRepository, MessageWithAuthor, RepoResult, UserRepository,
};
pub use value_objects::{InviteCode, Page};
