//! Group entity - a named community with invite-code admission

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::InviteCode;

/// Maximum number of groups a single user may own
pub const MAX_OWNED_GROUPS: i64 = 10;

/// Group of users.
///
/// Admission is by invite code. A code may carry a max-uses cap; once the
/// cap is reached the code is rotated and the counter reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub invite_code: InviteCode,
    pub invite_code_uses: i32,
    pub invite_code_max_uses: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group owned by `owner_id`, with a fresh invite code
    pub fn new(id: Uuid, name: String, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner_id,
            invite_code: InviteCode::generate(),
            invite_code_uses: 0,
            invite_code_max_uses: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Whether one more join would exhaust the invite code's cap
    pub fn invite_code_exhausted_by_next_use(&self) -> bool {
        match self.invite_code_max_uses {
            Some(max) => self.invite_code_uses + 1 >= max,
            None => false,
        }
    }

    /// Replace the invite code and reset the use counter
    pub fn rotate_invite_code(&mut self, max_uses: Option<i32>) {
        self.invite_code = InviteCode::generate();
        self.invite_code_uses = 0;
        self.invite_code_max_uses = max_uses;
        self.updated_at = Utc::now();
    }
}

/// Membership of a user in a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub is_owner: bool,
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn new(group_id: Uuid, user_id: Uuid, is_owner: bool) -> Self {
        Self {
            group_id,
            user_id,
            is_owner,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_invite_code_resets_uses() {
        let mut group = Group::new(Uuid::new_v4(), "team".to_string(), Uuid::new_v4());
        group.invite_code_uses = 5;
        let old_code = group.invite_code.clone();

        group.rotate_invite_code(Some(3));
        assert_ne!(group.invite_code, old_code);
        assert_eq!(group.invite_code_uses, 0);
        assert_eq!(group.invite_code_max_uses, Some(3));
    }

    #[test]
    fn test_invite_code_exhaustion() {
        let mut group = Group::new(Uuid::new_v4(), "team".to_string(), Uuid::new_v4());
        // No cap, never exhausts
        assert!(!group.invite_code_exhausted_by_next_use());

        group.invite_code_max_uses = Some(2);
        group.invite_code_uses = 0;
        assert!(!group.invite_code_exhausted_by_next_use());
        group.invite_code_uses = 1;
        assert!(group.invite_code_exhausted_by_next_use());
    }
}
