//! Auth service
//!
//! Resolves the authenticated user behind a presented credential. Token
//! issuance and the OAuth exchange happen upstream; this is the one
//! interface both transports consume. The HTTP bearer extractor and the
//! websocket handshake are adapters over it.

use tracing::{instrument, warn};

use huddle_core::entities::User;

use super::context::ServiceContext;

/// Auth service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the user behind an access token.
    ///
    /// Every failure mode (expired token, malformed token, unknown user,
    /// even a persistence error) maps to `None`. Callers treat `None` as
    /// "unauthenticated" and never see an error from here.
    #[instrument(skip(self, token))]
    pub async fn resolve_identity(&self, token: &str) -> Option<User> {
        let claims = self.ctx.jwt_service().validate_access_token(token).ok()?;
        let user_id = claims.user_id().ok()?;

        match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Identity lookup failed");
                None
            }
        }
    }
}
