//! Domain entities - core business objects

mod call;
mod channel;
mod friendship;
mod group;
mod message;
mod user;

pub use call::{CallChannel, CallMember};
pub use channel::{Channel, ChannelKind};
pub use friendship::{Friendship, FriendshipRequest, FriendshipRequestStatus};
pub use group::{Group, GroupMember, MAX_OWNED_GROUPS};
pub use message::{Message, MessageKind};
pub use user::{Profile, User};
