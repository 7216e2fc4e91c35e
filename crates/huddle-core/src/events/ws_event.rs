//! Websocket event names
//!
//! One name per boundary event, used both for inbound client commands and
//! outbound pushes. Names are part of the wire contract; do not rename.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every event name used over the websocket transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WsEvent {
    #[serde(rename = "request-call")]
    RequestCall,
    #[serde(rename = "accept-request-call")]
    AcceptRequestCall,
    #[serde(rename = "cancel-call")]
    CancelCall,

    #[serde(rename = "create-direct-message")]
    CreateDirectMessage,
    #[serde(rename = "create-group-message")]
    CreateGroupMessage,
    #[serde(rename = "delete-direct-message")]
    DeleteDirectMessage,
    #[serde(rename = "delete-group-message")]
    DeleteGroupMessage,

    #[serde(rename = "notification-new-friend-request")]
    NotificationNewFriendRequest,
}

impl WsEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestCall => "request-call",
            Self::AcceptRequestCall => "accept-request-call",
            Self::CancelCall => "cancel-call",
            Self::CreateDirectMessage => "create-direct-message",
            Self::CreateGroupMessage => "create-group-message",
            Self::DeleteDirectMessage => "delete-direct-message",
            Self::DeleteGroupMessage => "delete-group-message",
            Self::NotificationNewFriendRequest => "notification-new-friend-request",
        }
    }
}

impl fmt::Display for WsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
