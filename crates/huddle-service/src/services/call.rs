//! Call signaling service
//!
//! The call lifecycle between exactly two users: request (ringing), accept,
//! cancel, and the implicit cancel on disconnect. A user occupies at most
//! one call channel at a time; the membership table's unique constraint
//! enforces that even when two admissions race.

use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use huddle_core::entities::{CallChannel, CallMember};
use huddle_core::error::DomainError;
use huddle_core::events::WsEvent;

use crate::dto::CallChannelResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Call signaling service
pub struct CallService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CallService<'a> {
    /// Create a new CallService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start ringing a callee.
    ///
    /// Preconditions, in order: the callee exists, the callee is online,
    /// and neither party is already in a call. The two membership reads
    /// give precise errors; the insert itself is still guarded by the
    /// unique constraint, so a second admission racing past the checks
    /// rolls back instead of double-booking a user.
    #[instrument(skip(self))]
    pub async fn request_call(
        &self,
        caller_id: Uuid,
        callee_id: Uuid,
    ) -> ServiceResult<CallChannelResponse> {
        let callee = self
            .ctx
            .user_repo()
            .find_by_id(callee_id)
            .await?
            .ok_or(DomainError::UserNotFound(callee_id))?;

        if !callee.is_online() {
            return Err(DomainError::UserOffline(callee_id).into());
        }

        if self.ctx.call_repo().find_by_member(caller_id).await?.is_some() {
            return Err(DomainError::AlreadyInCall(caller_id).into());
        }
        if self.ctx.call_repo().find_by_member(callee_id).await?.is_some() {
            return Err(DomainError::AlreadyInCall(callee_id).into());
        }

        let channel = CallChannel::new(Uuid::new_v4(), caller_id);
        self.ctx
            .call_repo()
            .create(&channel, caller_id, callee_id)
            .await?;

        info!(
            call_id = %channel.id,
            caller_id = %caller_id,
            callee_id = %callee_id,
            "Call requested"
        );

        let members = self.ctx.call_repo().members(channel.id).await?;
        let response = CallChannelResponse::new(&channel, &members);

        // Both parties ring: the caller's own connection gets the push too
        self.push_to(&members, WsEvent::RequestCall, &response, None);

        Ok(response)
    }

    /// Accept the ringing call the user is in.
    ///
    /// The caller cannot accept their own call. The member list is read
    /// before any mutation so the notification set is complete.
    #[instrument(skip(self))]
    pub async fn accept_call(&self, user_id: Uuid) -> ServiceResult<CallChannelResponse> {
        let mut channel = self
            .ctx
            .call_repo()
            .find_by_member(user_id)
            .await?
            .ok_or(DomainError::NotInCall)?;

        if channel.is_caller(user_id) {
            return Err(DomainError::IsCaller.into());
        }

        let members = self.ctx.call_repo().members(channel.id).await?;

        let now = Utc::now();
        self.ctx.call_repo().set_accepted(channel.id, now).await?;
        channel.accept(now);

        info!(call_id = %channel.id, user_id = %user_id, "Call accepted");

        let response = CallChannelResponse::new(&channel, &members);
        self.push_to(&members, WsEvent::AcceptRequestCall, &response, None);

        Ok(response)
    }

    /// Cancel the call the user is in (decline, hang up, or abort ringing).
    ///
    /// The remaining members are notified before the channel row is
    /// deleted; deletion cascades the memberships.
    #[instrument(skip(self))]
    pub async fn cancel_call(&self, user_id: Uuid) -> ServiceResult<CallChannelResponse> {
        let channel = self
            .ctx
            .call_repo()
            .find_by_member(user_id)
            .await?
            .ok_or(DomainError::NotInCall)?;

        let members = self.ctx.call_repo().members(channel.id).await?;
        let response = CallChannelResponse::new(&channel, &members);

        // Peers first, then the destructive delete
        self.push_to(&members, WsEvent::CancelCall, &response, Some(user_id));
        self.ctx.call_repo().delete(channel.id).await?;

        info!(call_id = %channel.id, user_id = %user_id, "Call cancelled");

        Ok(response)
    }

    /// Disconnect cleanup: cancel whatever call the user was in. A user
    /// with no call is a no-op, not an error.
    #[instrument(skip(self))]
    pub async fn handle_disconnect(&self, user_id: Uuid) -> ServiceResult<()> {
        match self.cancel_call(user_id).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.as_domain(), Some(DomainError::NotInCall)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Push an event to call members' live connections, optionally skipping
    /// one user (the one who triggered the event).
    fn push_to(
        &self,
        members: &[CallMember],
        event: WsEvent,
        response: &CallChannelResponse,
        exclude: Option<Uuid>,
    ) {
        let payload = json!(response);
        for member in members {
            if exclude == Some(member.user_id) {
                continue;
            }
            if let Some(ws_id) = &member.ws_id {
                self.ctx.pusher().push(ws_id, event, &payload);
            }
        }
    }
}
