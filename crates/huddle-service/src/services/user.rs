//! User service
//!
//! Profile reads and updates, plus the user directory search.

use tracing::{info, instrument};
use uuid::Uuid;

use huddle_core::entities::Profile;
use huddle_core::error::DomainError;
use huddle_core::value_objects::Page;

use crate::dto::{
    CurrentUserResponse, Paginated, ProfileResponse, UpdateProfileRequest, UserPresenceResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The current authenticated user with their profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Uuid) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let profile = self
            .ctx
            .user_repo()
            .find_profile(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(CurrentUserResponse::new(&user, &profile))
    }

    /// Update the current user's profile
    #[instrument(skip(self, data))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        data: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let profile = Profile {
            user_id,
            full_name: data.full_name,
            avatar_url: data.avatar_url,
        };
        self.ctx.user_repo().update_profile(&profile).await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(ProfileResponse::from(&profile))
    }

    /// Search the user directory by full-name substring
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: Option<&str>,
        page: Page,
    ) -> ServiceResult<Paginated<UserPresenceResponse>> {
        let (rows, total) = self.ctx.user_repo().search_profiles(query, page).await?;
        let data = rows.iter().map(UserPresenceResponse::from).collect();
        Ok(Paginated::new(data, total, page))
    }
}
