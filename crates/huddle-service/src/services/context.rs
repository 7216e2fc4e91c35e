//! Service context - dependency container for services
//!
//! Holds the repositories, the outbound push port, and the JWT service.

use std::sync::Arc;

use huddle_common::auth::JwtService;
use huddle_core::traits::{
    CallRepository, ChannelRepository, ConnectionPush, FriendRepository, GroupRepository,
    MessageRepository, UserRepository,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (the persistence ports)
/// - The outbound push port (live websocket delivery)
/// - JWT service for identity resolution
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    friend_repo: Arc<dyn FriendRepository>,
    group_repo: Arc<dyn GroupRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    message_repo: Arc<dyn MessageRepository>,
    call_repo: Arc<dyn CallRepository>,

    // Outbound push
    pusher: Arc<dyn ConnectionPush>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        friend_repo: Arc<dyn FriendRepository>,
        group_repo: Arc<dyn GroupRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        message_repo: Arc<dyn MessageRepository>,
        call_repo: Arc<dyn CallRepository>,
        pusher: Arc<dyn ConnectionPush>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            friend_repo,
            group_repo,
            channel_repo,
            message_repo,
            call_repo,
            pusher,
            jwt_service,
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the friend repository
    pub fn friend_repo(&self) -> &dyn FriendRepository {
        self.friend_repo.as_ref()
    }

    /// Get the group repository
    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the call repository
    pub fn call_repo(&self) -> &dyn CallRepository {
        self.call_repo.as_ref()
    }

    /// Get the outbound push port
    pub fn pusher(&self) -> &dyn ConnectionPush {
        self.pusher.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("pusher", &"ConnectionPush")
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    friend_repo: Option<Arc<dyn FriendRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    call_repo: Option<Arc<dyn CallRepository>>,
    pusher: Option<Arc<dyn ConnectionPush>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            friend_repo: None,
            group_repo: None,
            channel_repo: None,
            message_repo: None,
            call_repo: None,
            pusher: None,
            jwt_service: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn friend_repo(mut self, repo: Arc<dyn FriendRepository>) -> Self {
        self.friend_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn call_repo(mut self, repo: Arc<dyn CallRepository>) -> Self {
        self.call_repo = Some(repo);
        self
    }

    pub fn pusher(mut self, pusher: Arc<dyn ConnectionPush>) -> Self {
        self.pusher = Some(pusher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.friend_repo
                .ok_or_else(|| ServiceError::validation("friend_repo is required"))?,
            self.group_repo
                .ok_or_else(|| ServiceError::validation("group_repo is required"))?,
            self.channel_repo
                .ok_or_else(|| ServiceError::validation("channel_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.call_repo
                .ok_or_else(|| ServiceError::validation("call_repo is required"))?,
            self.pusher
                .ok_or_else(|| ServiceError::validation("pusher is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
