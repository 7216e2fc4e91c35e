//! Channel entity <-> model mapper

use huddle_core::entities::{Channel, ChannelKind};

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: model.id,
            kind: parse_kind(&model.kind),
            group_id: model.group_id,
            name: model.name,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// The column only ever holds the two values written by this crate
fn parse_kind(kind: &str) -> ChannelKind {
    match kind {
        "group" => ChannelKind::Group,
        _ => ChannelKind::Direct,
    }
}
