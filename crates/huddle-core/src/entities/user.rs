//! User entity - account identity and presence

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User account.
///
/// `ws_id` is the presence column: the id of the user's currently bound
/// websocket connection, or `None` when offline. At most one live connection
/// per user; a second connect overwrites the first (last write wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub ws_id: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Uuid, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            ws_id: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user currently has a live connection
    #[inline]
    pub fn is_online(&self) -> bool {
        self.ws_id.is_some()
    }

    /// Bind a connection id (connect). Unconditional overwrite.
    pub fn bind_connection(&mut self, ws_id: String) {
        self.ws_id = Some(ws_id);
        self.updated_at = Utc::now();
    }

    /// Release the connection, but only if `ws_id` matches the currently
    /// bound one. A stale disconnect from an older socket must not clobber
    /// a newer binding.
    pub fn release_connection(&mut self, ws_id: &str) -> bool {
        if self.ws_id.as_deref() == Some(ws_id) {
            self.ws_id = None;
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }
}

/// Public profile, 1:1 with a user.
///
/// Fan-out payloads and listings embed profiles, never the bare user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn new(user_id: Uuid, full_name: String) -> Self {
        Self {
            user_id,
            full_name,
            avatar_url: None,
        }
    }
}
