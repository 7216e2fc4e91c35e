//! User and profile database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub ws_id: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub user_id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
}
