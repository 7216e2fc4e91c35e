//! Channel entity - message container (direct or group)

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of message channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// 1:1 channel between two users; membership rows are the authorization
    Direct,
    /// Channel inside a group; authorization is group membership
    Group,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Group => "group",
        }
    }
}

/// Message channel.
///
/// Direct channels have no name and no group; group channels belong to a
/// group and can be soft-deleted. `updated_at` is bumped on each direct
/// message so the recent-channel list sorts by activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Uuid,
    pub kind: ChannelKind,
    pub group_id: Option<Uuid>,
    pub name: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new direct channel
    pub fn new_direct(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: ChannelKind::Direct,
            group_id: None,
            name: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new group channel
    pub fn new_group(id: Uuid, group_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind: ChannelKind::Group,
            group_id: Some(group_id),
            name: Some(name),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self.kind, ChannelKind::Direct)
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChannelKind::Group)
    }
}
