//! Message entity - a chat message in a direct or group channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of message content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

/// Chat message.
///
/// Deletion is soft: the row stays, `is_deleted` flips, and `value` is
/// masked to the empty string at read time only. The stored value is never
/// erased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub author_id: Uuid,
    pub kind: MessageKind,
    pub value: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(id: Uuid, channel_id: Uuid, author_id: Uuid, kind: MessageKind, value: String) -> Self {
        Self {
            id,
            channel_id,
            author_id,
            kind,
            value,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    /// The value as it must be serialized: redacted when deleted.
    pub fn redacted_value(&self) -> &str {
        if self.is_deleted {
            ""
        } else {
            &self.value
        }
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_not_deleted() {
        let msg = Message::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            MessageKind::Text,
            "hello".to_string(),
        );
        assert!(!msg.is_deleted);
        assert_eq!(msg.redacted_value(), "hello");
    }

    #[test]
    fn test_redaction_masks_value_but_keeps_storage() {
        let mut msg = Message::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            MessageKind::Text,
            "secret".to_string(),
        );
        msg.is_deleted = true;
        assert_eq!(msg.redacted_value(), "");
        // The row retains the value at rest
        assert_eq!(msg.value, "secret");
    }
}
