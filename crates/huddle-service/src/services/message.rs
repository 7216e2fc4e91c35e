//! Message service
//!
//! Message creation and soft deletion, with fan-out: after the row commits,
//! the event is pushed to every channel member's live connection, the sender
//! included. Push is fire-and-forget; offline members simply miss the event
//! and catch up from the listing endpoints.

use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use huddle_core::entities::Message;
use huddle_core::error::DomainError;
use huddle_core::events::WsEvent;
use huddle_core::traits::MemberPresence;

use crate::dto::{
    CreateDirectMessageData, CreateGroupMessageData, DeleteDirectMessageData,
    DeleteGroupMessageData, MessageDeletedResponse, MessageResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a message in a direct channel and fan it out.
    ///
    /// Authorization is the membership row: the named check below, not a
    /// side effect of some query filter. The insert and the channel's
    /// recency bump commit in one transaction.
    #[instrument(skip(self, data))]
    pub async fn create_direct_message(
        &self,
        author_id: Uuid,
        data: CreateDirectMessageData,
    ) -> ServiceResult<MessageResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(data.channel_id)
            .await?
            .filter(|c| c.is_direct())
            .ok_or(DomainError::ChannelNotFound(data.channel_id))?;

        let members = self.ctx.channel_repo().direct_members(channel.id).await?;
        let author = members
            .iter()
            .find(|m| m.user_id == author_id)
            .ok_or(DomainError::NotChannelMember)?
            .clone();

        let message = Message::new(
            Uuid::new_v4(),
            channel.id,
            author_id,
            data.kind,
            data.value,
        );
        self.ctx.message_repo().create_direct(&message).await?;

        info!(
            message_id = %message.id,
            channel_id = %channel.id,
            author_id = %author_id,
            "Direct message created"
        );

        let response =
            MessageResponse::from_entity(&message, &author.full_name, author.avatar_url.as_deref());
        self.fan_out(&members, WsEvent::CreateDirectMessage, &json!(response));

        Ok(response)
    }

    /// Create a message in a group channel and fan it out to every group
    /// member's live connection.
    #[instrument(skip(self, data))]
    pub async fn create_group_message(
        &self,
        author_id: Uuid,
        data: CreateGroupMessageData,
    ) -> ServiceResult<MessageResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(data.channel_id)
            .await?
            .filter(|c| c.is_group() && !c.is_deleted)
            .ok_or(DomainError::ChannelNotFound(data.channel_id))?;

        let group_id = channel
            .group_id
            .ok_or_else(|| ServiceError::internal("group channel without group_id"))?;

        self.ctx
            .group_repo()
            .find_membership(group_id, author_id)
            .await?
            .ok_or(DomainError::NotGroupMember)?;

        let members = self.ctx.group_repo().members_presence(group_id).await?;
        let author = members
            .iter()
            .find(|m| m.user_id == author_id)
            .ok_or(DomainError::NotGroupMember)?
            .clone();

        // Group channels do not participate in the recency ordering, so a
        // plain insert suffices.
        let message = Message::new(
            Uuid::new_v4(),
            channel.id,
            author_id,
            data.kind,
            data.value,
        );
        self.ctx.message_repo().create(&message).await?;

        info!(
            message_id = %message.id,
            channel_id = %channel.id,
            group_id = %group_id,
            "Group message created"
        );

        let response =
            MessageResponse::from_entity(&message, &author.full_name, author.avatar_url.as_deref());
        self.fan_out(&members, WsEvent::CreateGroupMessage, &json!(response));

        Ok(response)
    }

    /// Soft-delete one of the requester's direct messages.
    ///
    /// Missing, foreign-owned, and already-deleted messages all answer with
    /// the same `MessageNotFound`. The deletion event carries only the
    /// channel id and message id; the value stays at rest, masked at read
    /// time forever after.
    #[instrument(skip(self))]
    pub async fn delete_direct_message(
        &self,
        requester_id: Uuid,
        data: DeleteDirectMessageData,
    ) -> ServiceResult<MessageDeletedResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_owned_active(data.message_id, requester_id)
            .await?
            .ok_or(DomainError::MessageNotFound(data.message_id))?;

        self.ctx.message_repo().mark_deleted(message.id).await?;

        info!(
            message_id = %message.id,
            channel_id = %message.channel_id,
            "Direct message deleted"
        );

        let members = self
            .ctx
            .channel_repo()
            .direct_members(message.channel_id)
            .await?;

        let response = MessageDeletedResponse {
            channel_id: message.channel_id.to_string(),
            message_id: message.id.to_string(),
        };
        self.fan_out(&members, WsEvent::DeleteDirectMessage, &json!(response));

        Ok(response)
    }

    /// Soft-delete one of the requester's group messages.
    #[instrument(skip(self))]
    pub async fn delete_group_message(
        &self,
        requester_id: Uuid,
        data: DeleteGroupMessageData,
    ) -> ServiceResult<MessageDeletedResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_owned_active(data.message_id, requester_id)
            .await?
            .ok_or(DomainError::MessageNotFound(data.message_id))?;

        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(message.channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(message.channel_id))?;

        let group_id = channel
            .group_id
            .ok_or(DomainError::MessageNotFound(data.message_id))?;

        self.ctx.message_repo().mark_deleted(message.id).await?;

        info!(
            message_id = %message.id,
            channel_id = %message.channel_id,
            "Group message deleted"
        );

        let members = self.ctx.group_repo().members_presence(group_id).await?;

        let response = MessageDeletedResponse {
            channel_id: message.channel_id.to_string(),
            message_id: message.id.to_string(),
        };
        self.fan_out(&members, WsEvent::DeleteGroupMessage, &json!(response));

        Ok(response)
    }

    /// Push an event to every member with a live connection. Broadcast is
    /// to all members: the sender receives their own event too.
    fn fan_out(&self, members: &[MemberPresence], event: WsEvent, payload: &serde_json::Value) {
        for member in members {
            if let Some(ws_id) = &member.ws_id {
                self.ctx.pusher().push(ws_id, event, payload);
            }
        }
    }
}
