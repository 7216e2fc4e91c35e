//! Call channel entity - a ringing or in-progress 1:1 call

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Transient record of one call between exactly two users.
///
/// `accepted_at == None` means the call is still ringing. Rejection has no
/// persisted state: declining, cancelling, or disconnecting all delete the
/// channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallChannel {
    pub id: Uuid,
    pub created_by: Uuid,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CallChannel {
    /// Create a new ringing call channel
    pub fn new(id: Uuid, created_by: Uuid) -> Self {
        Self {
            id,
            created_by,
            accepted_at: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the call is still ringing (not yet accepted)
    #[inline]
    pub fn is_ringing(&self) -> bool {
        self.accepted_at.is_none()
    }

    /// Whether `user_id` is the caller
    #[inline]
    pub fn is_caller(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    /// Mark the call accepted
    pub fn accept(&mut self, at: DateTime<Utc>) {
        self.accepted_at = Some(at);
    }
}

/// Membership of a user in a call channel, carrying the data fan-out needs:
/// the member's live connection id (if any) and display profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMember {
    pub user_id: Uuid,
    pub ws_id: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_call_is_ringing() {
        let caller = Uuid::new_v4();
        let call = CallChannel::new(Uuid::new_v4(), caller);
        assert!(call.is_ringing());
        assert!(call.is_caller(caller));
        assert!(!call.is_caller(Uuid::new_v4()));
    }

    #[test]
    fn test_accept_clears_ringing() {
        let mut call = CallChannel::new(Uuid::new_v4(), Uuid::new_v4());
        call.accept(Utc::now());
        assert!(!call.is_ringing());
    }
}
