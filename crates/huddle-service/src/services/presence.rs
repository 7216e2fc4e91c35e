//! Presence service
//!
//! The presence registry: binds authenticated users to their live websocket
//! connection via the `ws_id` column on the user row. The column is the
//! single source of truth, and it survives nothing: at boot every binding
//! is reset, since no live connection can legitimately exist yet.

use tracing::{info, instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Bind a connection to the user (called when a socket authenticates).
    ///
    /// Unconditional overwrite: if two sockets of the same account connect
    /// near-simultaneously, the most recent write wins and the other socket
    /// stays open but orphaned from presence.
    #[instrument(skip(self))]
    pub async fn connect(&self, user_id: Uuid, ws_id: &str) -> ServiceResult<()> {
        self.ctx.user_repo().bind_connection(user_id, ws_id).await?;
        info!(user_id = %user_id, ws_id = %ws_id, "Presence bound");
        Ok(())
    }

    /// Release the user's connection (called when the socket closes).
    ///
    /// Only clears when the stored `ws_id` still equals the disconnecting
    /// connection's id, so a stale disconnect from an already-replaced
    /// socket cannot knock a newer connection offline. Returns whether the
    /// binding was actually cleared.
    #[instrument(skip(self))]
    pub async fn disconnect(&self, user_id: Uuid, ws_id: &str) -> ServiceResult<bool> {
        let cleared = self
            .ctx
            .user_repo()
            .release_connection(user_id, ws_id)
            .await?;

        if cleared {
            info!(user_id = %user_id, ws_id = %ws_id, "Presence released");
        } else {
            tracing::debug!(
                user_id = %user_id,
                ws_id = %ws_id,
                "Stale disconnect ignored (connection already replaced)"
            );
        }

        Ok(cleared)
    }

    /// Whether the user currently has a live connection
    #[instrument(skip(self))]
    pub async fn is_online(&self, user_id: Uuid) -> ServiceResult<bool> {
        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        Ok(user.is_some_and(|u| u.is_online()))
    }

    /// Reset all presence state at process startup: null every `ws_id` and
    /// delete every call channel. Run before the listener binds.
    #[instrument(skip(self))]
    pub async fn reset_on_boot(&self) -> ServiceResult<(u64, u64)> {
        let connections = self.ctx.user_repo().reset_all_connections().await?;
        let calls = self.ctx.call_repo().delete_all().await?;

        info!(
            connections_cleared = connections,
            calls_purged = calls,
            "Presence state reset at boot"
        );

        Ok((connections, calls))
    }
}
