//! Friendship entities - requests and established friendships

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a friendship request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipRequestStatus {
    Pending,
    Accepted,
}

impl FriendshipRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

/// A friend request from one user to another.
///
/// At most one request exists per unordered pair of users, whichever
/// direction it was sent in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendshipRequest {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub status: FriendshipRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendshipRequest {
    pub fn new(from_user_id: Uuid, to_user_id: Uuid) -> Self {
        Self {
            from_user_id,
            to_user_id,
            status: FriendshipRequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, FriendshipRequestStatus::Pending)
    }

    /// Whether this request connects the given pair, in either direction
    pub fn links(&self, a: Uuid, b: Uuid) -> bool {
        (self.from_user_id == a && self.to_user_id == b)
            || (self.from_user_id == b && self.to_user_id == a)
    }
}

/// An established friendship edge.
///
/// Stored as two reciprocal rows, one per direction, so "friends of X" is a
/// single-column lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(from_user_id: Uuid, to_user_id: Uuid) -> Self {
        Self {
            from_user_id,
            to_user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_links_either_direction() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let request = FriendshipRequest::new(a, b);
        assert!(request.links(a, b));
        assert!(request.links(b, a));
        assert!(!request.links(a, Uuid::new_v4()));
    }

    #[test]
    fn test_new_request_is_pending() {
        let request = FriendshipRequest::new(Uuid::new_v4(), Uuid::new_v4());
        assert!(request.is_pending());
    }
}
