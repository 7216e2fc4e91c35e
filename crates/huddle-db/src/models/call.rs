//! Call channel database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the call_channels table
#[derive(Debug, Clone, FromRow)]
pub struct CallChannelModel {
    pub id: Uuid,
    pub created_by: Uuid,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Call membership joined with presence and profile
#[derive(Debug, Clone, FromRow)]
pub struct CallMemberModel {
    pub user_id: Uuid,
    pub ws_id: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
}
