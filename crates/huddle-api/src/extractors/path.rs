//! Path parameter structs
//!
//! Typed path parameters for multi-segment routes; UUIDs are parsed by
//! serde, so a malformed id rejects before the handler runs.

use serde::Deserialize;
use uuid::Uuid;

/// Path parameters with group_id and channel_id
#[derive(Debug, Deserialize)]
pub struct GroupChannelPath {
    pub group_id: Uuid,
    pub channel_id: Uuid,
}

/// Path parameters with group_id and user_id
#[derive(Debug, Deserialize)]
pub struct GroupUserPath {
    pub group_id: Uuid,
    pub user_id: Uuid,
}
