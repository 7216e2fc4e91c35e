//! Friend service
//!
//! Friendship requests and established friendships. Accepting a request
//! also ensures a direct channel exists between the pair, so the new
//! friends can message immediately.

use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use huddle_core::entities::{Channel, FriendshipRequest};
use huddle_core::error::DomainError;
use huddle_core::events::WsEvent;
use huddle_core::value_objects::Page;

use crate::dto::{FriendRequestResponse, Paginated, UserPresenceResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Friend service
pub struct FriendService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendService<'a> {
    /// Create a new FriendService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a friend request. At most one request may exist per pair,
    /// whichever direction it was sent in.
    #[instrument(skip(self))]
    pub async fn send_request(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> ServiceResult<FriendRequestResponse> {
        if from_user_id == to_user_id {
            return Err(DomainError::CannotBefriendSelf.into());
        }

        let recipient = self
            .ctx
            .user_repo()
            .find_by_id(to_user_id)
            .await?
            .ok_or(DomainError::UserNotFound(to_user_id))?;

        if self
            .ctx
            .friend_repo()
            .find_request_between(from_user_id, to_user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::FriendRequestExists.into());
        }

        let request = FriendshipRequest::new(from_user_id, to_user_id);
        self.ctx.friend_repo().create_request(&request).await?;

        info!(
            from_user_id = %from_user_id,
            to_user_id = %to_user_id,
            "Friend request created"
        );

        // Nudge the recipient if they are online
        if let Some(ws_id) = &recipient.ws_id {
            if let Some(sender) = self.ctx.user_repo().find_profile(from_user_id).await? {
                self.ctx.pusher().push(
                    ws_id,
                    WsEvent::NotificationNewFriendRequest,
                    &json!({
                        "from_user_id": from_user_id.to_string(),
                        "full_name": sender.full_name,
                        "avatar_url": sender.avatar_url,
                    }),
                );
            }
        }

        Ok(FriendRequestResponse::from(&request))
    }

    /// Pending requests the user has sent
    #[instrument(skip(self))]
    pub async fn list_sent(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<UserPresenceResponse>> {
        let (rows, total) = self.ctx.friend_repo().list_requests_from(user_id, page).await?;
        let data = rows.iter().map(UserPresenceResponse::from).collect();
        Ok(Paginated::new(data, total, page))
    }

    /// Pending requests the user has received
    #[instrument(skip(self))]
    pub async fn list_received(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<UserPresenceResponse>> {
        let (rows, total) = self.ctx.friend_repo().list_requests_to(user_id, page).await?;
        let data = rows.iter().map(UserPresenceResponse::from).collect();
        Ok(Paginated::new(data, total, page))
    }

    /// Count of pending requests the user has sent
    #[instrument(skip(self))]
    pub async fn count_sent(&self, user_id: Uuid) -> ServiceResult<i64> {
        Ok(self.ctx.friend_repo().count_requests_from(user_id).await?)
    }

    /// Count of pending requests the user has received
    #[instrument(skip(self))]
    pub async fn count_received(&self, user_id: Uuid) -> ServiceResult<i64> {
        Ok(self.ctx.friend_repo().count_requests_to(user_id).await?)
    }

    /// Accept a pending request addressed to `to_user_id`.
    ///
    /// Ensures the pair's direct channel exists (created once, reused
    /// forever), then flips the request and writes the two reciprocal
    /// friendship rows atomically.
    #[instrument(skip(self))]
    pub async fn accept_request(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
    ) -> ServiceResult<FriendRequestResponse> {
        let request = self
            .ctx
            .friend_repo()
            .find_request_between(from_user_id, to_user_id)
            .await?
            .filter(|r| r.is_pending() && r.from_user_id == from_user_id)
            .ok_or(DomainError::FriendRequestNotFound)?;

        if self
            .ctx
            .channel_repo()
            .find_direct_between(from_user_id, to_user_id)
            .await?
            .is_none()
        {
            let channel = Channel::new_direct(Uuid::new_v4());
            self.ctx
                .channel_repo()
                .create_direct(&channel, from_user_id, to_user_id)
                .await?;
        }

        self.ctx
            .friend_repo()
            .accept_request(from_user_id, to_user_id)
            .await?;

        info!(
            from_user_id = %from_user_id,
            to_user_id = %to_user_id,
            "Friend request accepted"
        );

        let mut accepted = request;
        accepted.status = huddle_core::entities::FriendshipRequestStatus::Accepted;
        Ok(FriendRequestResponse::from(&accepted))
    }

    /// Decline a received request (or withdraw a sent one)
    #[instrument(skip(self))]
    pub async fn decline_request(&self, a: Uuid, b: Uuid) -> ServiceResult<()> {
        let removed = self.ctx.friend_repo().delete_pending_between(a, b).await?;
        if removed == 0 {
            return Err(DomainError::FriendRequestNotFound.into());
        }

        info!(user_a = %a, user_b = %b, "Friend request removed");
        Ok(())
    }

    /// The user's friends, with presence
    #[instrument(skip(self))]
    pub async fn list_friends(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<UserPresenceResponse>> {
        let (rows, total) = self.ctx.friend_repo().list_friends(user_id, page).await?;
        let data = rows.iter().map(UserPresenceResponse::from).collect();
        Ok(Paginated::new(data, total, page))
    }

    /// Remove a friendship: both directions and any lingering requests
    #[instrument(skip(self))]
    pub async fn unfriend(&self, user_id: Uuid, friend_id: Uuid) -> ServiceResult<()> {
        if !self
            .ctx
            .friend_repo()
            .friendship_exists(user_id, friend_id)
            .await?
        {
            return Err(DomainError::FriendshipNotFound.into());
        }

        self.ctx
            .friend_repo()
            .delete_friendship_pair(user_id, friend_id)
            .await?;

        info!(user_id = %user_id, friend_id = %friend_id, "Friendship removed");
        Ok(())
    }
}
