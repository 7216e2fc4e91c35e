//! Friendship request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the friendship_requests table
#[derive(Debug, Clone, FromRow)]
pub struct FriendshipRequestModel {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
