//! Group database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub invite_code: String,
    pub invite_code_uses: i32,
    pub invite_code_max_uses: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the group_members table
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberModel {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub is_owner: bool,
    pub joined_at: DateTime<Utc>,
}

/// Member listing row: profile + presence + owner flag
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberRowModel {
    pub user_id: Uuid,
    pub ws_id: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub is_owner: bool,
}
