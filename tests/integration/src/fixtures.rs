//! Test fixtures and response shapes
//!
//! Request bodies and the response shapes integration tests deserialize.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create group request
#[derive(Debug, Serialize)]
pub struct CreateGroupBody {
    pub name: String,
}

impl CreateGroupBody {
    pub fn unique() -> Self {
        Self {
            name: format!("test group {}", unique_suffix()),
        }
    }
}

/// Create group channel request
#[derive(Debug, Serialize)]
pub struct CreateGroupChannelBody {
    pub name: String,
}

impl CreateGroupChannelBody {
    pub fn unique() -> Self {
        Self {
            name: format!("channel-{}", unique_suffix()),
        }
    }
}

/// Invite code rotation request
#[derive(Debug, Serialize)]
pub struct CreateInviteCodeBody {
    pub invite_code_max_uses: Option<i32>,
}

/// Profile update request
#[derive(Debug, Serialize)]
pub struct UpdateProfileBody {
    pub full_name: String,
    pub avatar_url: Option<String>,
}

// ============================================================================
// Response shapes
// ============================================================================

/// Paginated listing
#[derive(Debug, Deserialize)]
pub struct PaginatedBody<T> {
    pub data: Vec<T>,
    pub meta: MetaBody,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct MetaBody {
    pub total: i64,
    pub page: i64,
    pub take: i64,
}

/// Current user
#[derive(Debug, Deserialize)]
pub struct CurrentUserBody {
    pub id: String,
    pub email: String,
    pub profile: ProfileBody,
}

/// Profile
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub user_id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Profile + presence
#[derive(Debug, Deserialize)]
pub struct UserPresenceBody {
    pub profile: ProfileBody,
    pub is_online: bool,
}

/// Friend request row
#[derive(Debug, Deserialize)]
pub struct FriendRequestBody {
    pub from_user_id: String,
    pub to_user_id: String,
    pub status: String,
}

/// Group details
#[derive(Debug, Deserialize)]
pub struct GroupBody {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub invite_code: String,
    pub invite_code_uses: i32,
    pub invite_code_max_uses: Option<i32>,
}

/// Group member row
#[derive(Debug, Deserialize)]
pub struct MemberBody {
    pub user: UserPresenceBody,
    pub is_owner: bool,
}

/// Group channel
#[derive(Debug, Deserialize)]
pub struct ChannelBody {
    pub id: String,
    pub group_id: Option<String>,
    pub name: Option<String>,
}
