//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and seeding users. Identity issuance is upstream of this server, so
//! fixtures create users through the repository and mint tokens with the
//! same JWT service the server validates with.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use huddle_api::server::{create_app, create_app_state};
use huddle_api::state::AppState;
use huddle_common::{AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig};
use huddle_core::entities::{Profile, User};
use huddle_core::traits::UserRepository;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Check whether the test environment is available; tests skip when not
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping: DATABASE_URL not set");
        return false;
    }
    true
}

/// Build a config for tests from the environment
pub fn test_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();
    Ok(AppConfig {
        app: AppSettings {
            name: "huddle-test".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "integration-test-secret".to_string()),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
        },
        rate_limit: RateLimitConfig {
            // Generous: tests should never trip the limiter
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
    })
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        // Create app state
        let state = create_app_state(config)
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        // Build application
        let app = create_app(state.clone());

        // Bind to port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Seed a user directly and mint an access token for them
    pub async fn seed_user(&self, full_name: &str) -> Result<(Uuid, String)> {
        let id = Uuid::new_v4();
        let user = User::new(id, format!("{id}@example.com"));
        let profile = Profile::new(id, full_name.to_string());

        self.state
            .service_context()
            .user_repo()
            .create(&user, &profile)
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        let pair = self
            .state
            .jwt_service()
            .generate_token_pair(id)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok((id, pair.access_token))
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }
}

/// Assert a response has the expected status
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(())
}

/// Assert a response has the expected status and parse its JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected {
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(serde_json::from_str(&body)?)
}
