//! Channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: Uuid,
    pub kind: String,
    pub group_id: Option<Uuid>,
    pub name: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
