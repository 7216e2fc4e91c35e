//! Gateway state
//!
//! What the websocket handler needs: the service context (whose push port
//! is the registry below) and the registry itself for connection lifecycle.

use std::sync::Arc;

use huddle_service::ServiceContext;

use crate::connection::ConnectionRegistry;

/// State for the websocket route
#[derive(Clone)]
pub struct GatewayState {
    service_context: Arc<ServiceContext>,
    registry: Arc<ConnectionRegistry>,
}

impl GatewayState {
    /// Create a new GatewayState
    pub fn new(service_context: Arc<ServiceContext>, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            service_context,
            registry,
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
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
