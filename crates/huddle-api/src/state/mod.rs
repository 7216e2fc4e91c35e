//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the connection registry (shared with the gateway route), the database
//! pool (for health checks), and configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use huddle_common::{AppConfig, JwtService};
use huddle_db::PgPool;
use huddle_gateway::{ConnectionRegistry, GatewayState};
use huddle_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Live connection registry, shared with the gateway route
    registry: Arc<ConnectionRegistry>,
    /// Database pool (readiness checks)
    pool: PgPool,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: Arc<ServiceContext>,
        registry: Arc<ConnectionRegistry>,
        pool: PgPool,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context,
            registry,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the connection registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

/// The gateway route extracts its own state from the app state
impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        GatewayState::new(state.service_context.clone(), state.registry.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
