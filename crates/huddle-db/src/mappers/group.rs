//! Group entity <-> model mapper

use huddle_core::entities::{Group, GroupMember};
use huddle_core::value_objects::InviteCode;

use crate::models::{GroupMemberModel, GroupModel};

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: model.id,
            name: model.name,
            owner_id: model.owner_id,
            invite_code: InviteCode::from_string(model.invite_code),
            invite_code_uses: model.invite_code_uses,
            invite_code_max_uses: model.invite_code_max_uses,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<GroupMemberModel> for GroupMember {
    fn from(model: GroupMemberModel) -> Self {
        GroupMember {
            group_id: model.group_id,
            user_id: model.user_id,
            is_owner: model.is_owner,
            joined_at: model.joined_at,
        }
    }
}
