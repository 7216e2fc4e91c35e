//! Message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub author_id: Uuid,
    pub kind: String,
    pub value: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Message row joined with the author's profile, as listings query it
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithAuthorModel {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub author_id: Uuid,
    pub kind: String,
    pub value: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
}
