//! Server setup and initialization
//!
//! Provides the main application builder and server runner. Startup order
//! matters: the presence reset runs after the pool comes up and before the
//! listener binds, so no connection can race the boot invariant.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use huddle_common::{AppConfig, AppError, JwtService};
use huddle_db::{
    create_pool, PgCallRepository, PgChannelRepository, PgFriendRepository, PgGroupRepository,
    PgMessageRepository, PgUserRepository,
};
use huddle_gateway::ConnectionRegistry;
use huddle_service::{PresenceService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health endpoints bypass rate limiting
    let router = router.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = huddle_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    huddle_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // The registry doubles as the services' push port
    let registry = ConnectionRegistry::new_shared();

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let friend_repo = Arc::new(PgFriendRepository::new(pool.clone()));
    let group_repo = Arc::new(PgGroupRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let call_repo = Arc::new(PgCallRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .friend_repo(friend_repo)
        .group_repo(group_repo)
        .channel_repo(channel_repo)
        .message_repo(message_repo)
        .call_repo(call_repo)
        .pusher(registry.clone())
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;
    let service_context = Arc::new(service_context);

    // No live connection can exist yet: null every ws_id, purge calls
    PresenceService::new(&service_context)
        .reset_on_boot()
        .await
        .map_err(AppError::from)?;

    Ok(AppState::new(service_context, registry, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create app state (includes the boot-time presence reset)
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
