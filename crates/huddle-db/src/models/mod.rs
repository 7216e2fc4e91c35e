//! Database models - SQLx row types

mod call;
mod channel;
mod friend;
mod group;
mod message;
mod presence;
mod user;

pub use call::{CallChannelModel, CallMemberModel};
pub use channel::ChannelModel;
pub use friend::FriendshipRequestModel;
pub use group::{GroupMemberModel, GroupMemberRowModel, GroupModel};
pub use message::{MessageModel, MessageWithAuthorModel};
pub use presence::MemberPresenceModel;
pub use user::{ProfileModel, UserModel};
