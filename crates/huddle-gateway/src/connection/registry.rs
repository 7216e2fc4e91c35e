//! Connection registry
//!
//! The process-local map of connection id to outbound sender. This is the
//! transport half of presence: the durable half is the `ws_id` column on
//! the user row, and this map resolves those ids to live sockets.
//!
//! Implements the `ConnectionPush` port. Delivery is fire-and-forget: a
//! missing entry (the socket closed, or was never here) and a full outbound
//! queue are both silent no-ops, never errors.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use huddle_core::events::WsEvent;
use huddle_core::traits::ConnectionPush;

use crate::protocol::ServerFrame;

/// Registry of live websocket connections keyed by connection id
pub struct ConnectionRegistry {
    connections: DashMap<String, mpsc::Sender<ServerFrame>>,
}

impl ConnectionRegistry {
    /// Create a new connection registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a connection's outbound sender
    pub fn register(&self, ws_id: String, sender: mpsc::Sender<ServerFrame>) {
        tracing::debug!(ws_id = %ws_id, "Connection registered");
        self.connections.insert(ws_id, sender);
    }

    /// Remove a connection
    pub fn unregister(&self, ws_id: &str) {
        if self.connections.remove(ws_id).is_some() {
            tracing::debug!(ws_id = %ws_id, "Connection unregistered");
        }
    }

    /// Whether a connection is currently registered
    pub fn is_registered(&self, ws_id: &str) -> bool {
        self.connections.contains_key(ws_id)
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl ConnectionPush for ConnectionRegistry {
    fn push(&self, ws_id: &str, event: WsEvent, payload: &serde_json::Value) {
        let Some(sender) = self.connections.get(ws_id) else {
            tracing::trace!(ws_id = %ws_id, event = %event, "Push target gone, dropping");
            return;
        };

        let frame = ServerFrame::event(event, payload.clone());
        if let Err(e) = sender.try_send(frame) {
            // Slow consumer or a socket mid-close; the event is dropped
            tracing::debug!(ws_id = %ws_id, event = %event, error = %e, "Push not delivered");
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .finish()
    }
}
