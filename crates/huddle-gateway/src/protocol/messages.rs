//! Wire frames
//!
//! Both directions use JSON objects with an `event` field. Outbound event
//! pushes carry `data`; command error replies instead carry
//! `status: "error"` plus a code and message, echoing the event that
//! failed. A reader distinguishes the two by the presence of `status`.

use serde::{Deserialize, Serialize};

use huddle_core::events::WsEvent;

/// Inbound frame: a client command
#[derive(Debug, Clone, Deserialize)]
pub struct ClientFrame {
    pub event: WsEvent,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Outbound frame: an event push or a command error reply
#[derive(Debug, Clone, Serialize)]
pub struct ServerFrame {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerFrame {
    /// An event push
    pub fn event(event: WsEvent, data: serde_json::Value) -> Self {
        Self {
            event: event.as_str().to_string(),
            data: Some(data),
            status: None,
            error: None,
        }
    }

    /// An error reply to a failed command
    pub fn error(event: WsEvent, code: &str, message: &str) -> Self {
        Self {
            event: event.as_str().to_string(),
            data: None,
            status: Some("error".to_string()),
            error: Some(format!("{code}: {message}")),
        }
    }

    /// Serialize to the JSON text sent over the socket
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ClientFrame {
    /// Parse a text frame received from the socket
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
