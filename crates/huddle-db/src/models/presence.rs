//! Profile + presence join row

use sqlx::FromRow;
use uuid::Uuid;

/// Row shape shared by every "members with presence" query: a profile
/// joined with the user's `ws_id` column.
#[derive(Debug, Clone, FromRow)]
pub struct MemberPresenceModel {
    pub user_id: Uuid,
    pub ws_id: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
}
