//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod call;
pub mod channel;
pub mod context;
pub mod error;
pub mod friend;
pub mod group;
pub mod message;
pub mod presence;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use call::CallService;
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use friend::FriendService;
pub use group::GroupService;
pub use message::MessageService;
pub use presence::PresenceService;
pub use user::UserService;
