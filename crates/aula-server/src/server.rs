//! `PresenceServer` — axum HTTP server wiring.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use aula_auth::TokenVerifier;
use aula_registry::ConnectionRegistry;
use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::routes;
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Credential verifier.
    pub verifier: Arc<TokenVerifier>,
    /// Name of the cookie carrying the auth token.
    pub cookie_name: String,
    /// Shutdown coordinator.
    pub shutdown: Arc<ShutdownCoordinator>,
    /// When the server started.
    pub start_time: Instant,
}

/// The presence HTTP server.
pub struct PresenceServer {
    config: ServerConfig,
    registry: Arc<ConnectionRegistry>,
    verifier: Arc<TokenVerifier>,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl PresenceServer {
    /// Create a new server around an existing registry.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        registry: Arc<ConnectionRegistry>,
        verifier: Arc<TokenVerifier>,
    ) -> Self {
        Self {
            config,
            registry,
            verifier,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// Build the axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            registry: self.registry.clone(),
            verifier: self.verifier.clone(),
            cookie_name: self.config.cookie_name.clone(),
            shutdown: self.shutdown.clone(),
            start_time: self.start_time,
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/api/network/register", post(routes::register))
            .route(
                "/api/admin/connections/clear",
                post(routes::clear_connections),
            )
            .route("/api/admin/connections", get(routes::list_connections))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve until the shutdown token is cancelled.
    ///
    /// Returns the bound address (useful with port `0`) and the serve task
    /// handle.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;
        info!(%addr, "presence server listening");

        let app = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(token.cancelled_owned())
                .await;
            if let Err(e) = served {
                error!(error = %e, "server task exited with error");
            }
        });

        Ok((addr, handle))
    }

    /// Get the registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the shutdown coordinator.
    #[must_use]
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connections = state.registry.count();
    Json(health::health_check(state.start_time, connections))
}
