//! Outbound push port - deliver an event to one live connection

use crate::events::WsEvent;

/// Fire-and-forget delivery of an event to a single connection.
///
/// Implementations must never block or fail the caller: if the target
/// connection no longer exists (or its outbound queue is gone), the push is
/// a silent no-op. There is no delivery acknowledgment and no retry.
pub trait ConnectionPush: Send + Sync {
    /// Push `payload` as `event` to the connection identified by `ws_id`.
    fn push(&self, ws_id: &str, event: WsEvent, payload: &serde_json::Value);
}
