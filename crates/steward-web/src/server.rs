//! Web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers the API routes, and
//! runs the HTTP listener until shutdown.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use steward_intent::Interpreter;
use steward_ops::{ActionLog, Resolver};

use crate::ServiceConfig;
use crate::api;
use crate::state::AppState;

/// Name reported by the health endpoint.
const SERVICE_NAME: &str = "Steward API";

/// The Steward web server.
pub struct WebServer {
    config: ServiceConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server over an interpreter and resolver.
    ///
    /// The action log starts empty and lives as long as the server.
    pub fn new(config: ServiceConfig, interpreter: Interpreter, resolver: Resolver) -> Self {
        let state = Arc::new(AppState {
            interpreter,
            resolver,
            log: ActionLog::new(),
            service_name: SERVICE_NAME.to_string(),
        });
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);

        Router::new()
            .route("/api/chat", post(api::chat))
            .route("/api/actions", get(api::actions))
            .route("/api/rules", get(api::rules))
            .route("/api/health", get(api::health))
            .layer(cors)
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the TCP listener
    /// cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.config.validate()?;

        let addr = self.addr();
        let router = self.router();

        tracing::info!(addr = %addr, "starting web server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
