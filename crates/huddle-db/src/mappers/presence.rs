//! Member presence row mapper

use huddle_core::traits::MemberPresence;

use crate::models::MemberPresenceModel;

impl From<MemberPresenceModel> for MemberPresence {
    fn from(model: MemberPresenceModel) -> Self {
        MemberPresence {
            user_id: model.user_id,
            ws_id: model.ws_id,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
        }
    }
}
