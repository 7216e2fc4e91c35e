//! User entity <-> model mapper

use huddle_core::entities::{Profile, User};

use crate::models::{ProfileModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            ws_id: model.ws_id,
            refresh_token: model.refresh_token,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            user_id: model.user_id,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
        }
    }
}
