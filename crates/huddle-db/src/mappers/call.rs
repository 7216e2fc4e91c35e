//! Call channel entity <-> model mapper

use huddle_core::entities::{CallChannel, CallMember};

use crate::models::{CallChannelModel, CallMemberModel};

impl From<CallChannelModel> for CallChannel {
    fn from(model: CallChannelModel) -> Self {
        CallChannel {
            id: model.id,
            created_by: model.created_by,
            accepted_at: model.accepted_at,
            created_at: model.created_at,
        }
    }
}

impl From<CallMemberModel> for CallMember {
    fn from(model: CallMemberModel) -> Self {
        CallMember {
            user_id: model.user_id,
            ws_id: model.ws_id,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
        }
    }
}
