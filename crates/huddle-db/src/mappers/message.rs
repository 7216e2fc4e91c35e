//! Message entity <-> model mapper

use huddle_core::entities::{Message, MessageKind};
use huddle_core::traits::MessageWithAuthor;

use crate::models::{MessageModel, MessageWithAuthorModel};

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            channel_id: model.channel_id,
            author_id: model.author_id,
            kind: parse_kind(&model.kind),
            value: model.value,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
        }
    }
}

impl From<MessageWithAuthorModel> for MessageWithAuthor {
    fn from(model: MessageWithAuthorModel) -> Self {
        MessageWithAuthor {
            message: Message {
                id: model.id,
                channel_id: model.channel_id,
                author_id: model.author_id,
                kind: parse_kind(&model.kind),
                value: model.value,
                is_deleted: model.is_deleted,
                created_at: model.created_at,
            },
            author_name: model.author_name,
            author_avatar: model.author_avatar,
        }
    }
}

// The column only ever holds the two values written by this crate
fn parse_kind(kind: &str) -> MessageKind {
    match kind {
        "image" => MessageKind::Image,
        _ => MessageKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("image"), MessageKind::Image);
        assert_eq!(parse_kind("text"), MessageKind::Text);
    }
}
