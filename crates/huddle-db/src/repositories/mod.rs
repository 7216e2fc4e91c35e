//! PostgreSQL repository implementations

mod call;
mod channel;
mod error;
mod friend;
mod group;
mod message;
mod user;

pub use call::PgCallRepository;
pub use channel::PgChannelRepository;
pub use friend::PgFriendRepository;
pub use group::PgGroupRepository;
pub use message::PgMessageRepository;
pub use user::PgUserRepository;
