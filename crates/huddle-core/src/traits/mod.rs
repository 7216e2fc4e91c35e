//! Ports - traits the domain needs the infrastructure to implement

mod push;
mod repositories;

pub use push::ConnectionPush;
pub use repositories::{
    CallRepository, ChannelRepository, FriendRepository, GroupRepository, MemberPresence,
    MessageRepository, MessageWithAuthor, RepoResult, UserRepository,
};
