//! Channel service
//!
//! Listing endpoints for direct and group channels. Every message leaving
//! through here goes via `MessageResponse`, which masks deleted values.

use tracing::{info, instrument};
use uuid::Uuid;

use huddle_core::entities::Channel;
use huddle_core::error::DomainError;
use huddle_core::value_objects::Page;

use crate::dto::{
    ChannelResponse, CreateGroupChannelRequest, DirectChannelResponse, MessageResponse, Paginated,
    UpdateGroupChannelRequest, UserPresenceResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Direct channels
    // ========================================================================

    /// The user's recent direct channels: only channels with messages,
    /// newest activity first, each with the peer's profile/presence and the
    /// latest (redacted) message.
    #[instrument(skip(self))]
    pub async fn recent_direct_channels(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<DirectChannelResponse>> {
        let (channels, total) = self
            .ctx
            .channel_repo()
            .list_recent_direct(user_id, page)
            .await?;

        let mut data = Vec::with_capacity(channels.len());
        for channel in channels {
            let members = self.ctx.channel_repo().direct_members(channel.id).await?;
            let Some(peer) = members.iter().find(|m| m.user_id != user_id) else {
                continue;
            };

            let last_message = self
                .ctx
                .message_repo()
                .last_in_channel(channel.id)
                .await?
                .map(|row| MessageResponse::from_with_author(&row));

            data.push(DirectChannelResponse {
                id: channel.id.to_string(),
                user: UserPresenceResponse::from(peer),
                last_message,
                updated_at: channel.updated_at,
            });
        }

        Ok(Paginated::new(data, total, page))
    }

    /// Messages of a direct channel, member-only, newest first
    #[instrument(skip(self))]
    pub async fn direct_messages(
        &self,
        channel_id: Uuid,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<MessageResponse>> {
        if !self
            .ctx
            .channel_repo()
            .is_direct_member(channel_id, user_id)
            .await?
        {
            return Err(DomainError::ChannelNotFound(channel_id).into());
        }

        let (rows, total) = self
            .ctx
            .message_repo()
            .list_by_channel(channel_id, page)
            .await?;

        let data = rows.iter().map(MessageResponse::from_with_author).collect();
        Ok(Paginated::new(data, total, page))
    }

    // ========================================================================
    // Group channels
    // ========================================================================

    /// Create a group channel, owner-only
    #[instrument(skip(self, data))]
    pub async fn create_group_channel(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        data: CreateGroupChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        self.require_owner(group_id, user_id).await?;

        let channel = Channel::new_group(Uuid::new_v4(), group_id, data.name);
        self.ctx.channel_repo().create_group_channel(&channel).await?;

        info!(channel_id = %channel.id, group_id = %group_id, "Group channel created");
        Ok(ChannelResponse::new(&channel, None))
    }

    /// Active group channels, member-only, each with its latest (redacted)
    /// message
    #[instrument(skip(self))]
    pub async fn list_group_channels(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<ChannelResponse>> {
        self.require_member(group_id, user_id).await?;

        let (channels, total) = self
            .ctx
            .channel_repo()
            .list_group_channels(group_id, page)
            .await?;

        let mut data = Vec::with_capacity(channels.len());
        for channel in channels {
            let last_message = self
                .ctx
                .message_repo()
                .last_in_channel(channel.id)
                .await?
                .map(|row| MessageResponse::from_with_author(&row));
            data.push(ChannelResponse::new(&channel, last_message));
        }

        Ok(Paginated::new(data, total, page))
    }

    /// One group channel, member-only
    #[instrument(skip(self))]
    pub async fn get_group_channel(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<ChannelResponse> {
        self.require_member(group_id, user_id).await?;

        let channel = self
            .ctx
            .channel_repo()
            .find_group_channel(group_id, channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        Ok(ChannelResponse::new(&channel, None))
    }

    /// Rename a group channel, owner-only
    #[instrument(skip(self, data))]
    pub async fn update_group_channel(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
        user_id: Uuid,
        data: UpdateGroupChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        self.require_owner(group_id, user_id).await?;

        let mut channel = self
            .ctx
            .channel_repo()
            .find_group_channel(group_id, channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        channel.name = Some(data.name);
        self.ctx.channel_repo().update_group_channel(&channel).await?;

        info!(channel_id = %channel_id, "Group channel updated");
        Ok(ChannelResponse::new(&channel, None))
    }

    /// Soft-delete a group channel, owner-only. Messages stay in storage.
    #[instrument(skip(self))]
    pub async fn delete_group_channel(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<()> {
        self.require_owner(group_id, user_id).await?;

        self.ctx
            .channel_repo()
            .find_group_channel(group_id, channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        self.ctx
            .channel_repo()
            .soft_delete_group_channel(channel_id)
            .await?;

        info!(channel_id = %channel_id, "Group channel deleted");
        Ok(())
    }

    /// Messages of a group channel, member-only, newest first
    #[instrument(skip(self))]
    pub async fn group_messages(
        &self,
        group_id: Uuid,
        channel_id: Uuid,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<Paginated<MessageResponse>> {
        self.require_member(group_id, user_id).await?;

        self.ctx
            .channel_repo()
            .find_group_channel(group_id, channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        let (rows, total) = self
            .ctx
            .message_repo()
            .list_by_channel(channel_id, page)
            .await?;

        let data = rows.iter().map(MessageResponse::from_with_author).collect();
        Ok(Paginated::new(data, total, page))
    }

    /// Non-members get `GroupNotFound`, mirroring the group endpoints
    async fn require_member(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        self.ctx
            .group_repo()
            .find_membership(group_id, user_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?;
        Ok(())
    }

    async fn require_owner(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let membership = self
            .ctx
            .group_repo()
            .find_membership(group_id, user_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?;

        if !membership.is_owner {
            return Err(DomainError::NotGroupOwner.into());
        }
        Ok(())
    }
}
