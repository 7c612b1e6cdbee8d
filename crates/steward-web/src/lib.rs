//! HTTP API for Steward.
//!
//! This crate exposes the recognition pipeline and resolver over a small
//! REST surface:
//!
//! - `POST /api/chat` -- interpret a message, resolve it, log any SQL.
//! - `GET /api/actions` -- the session's append-only statement log.
//! - `GET /api/rules` -- the loaded rule set, for discovery.
//! - `GET /api/health` -- liveness probe.

pub mod api;
pub mod server;
pub mod state;

pub use server::WebServer;
pub use state::AppState;

use std::env;

/// Web service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// The address to bind the HTTP server to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl ServiceConfig {
    /// Load the configuration from `SERVER_HOST` / `SERVER_PORT`, keeping
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = Self::default();

        if let Ok(host) = env::var("SERVER_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| format!("invalid SERVER_PORT `{port}`: {e}"))?;
        }

        Ok(config)
    }

    /// Reject privileged ports.  The `u16` type already caps the upper end.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.port < 1024 {
            return Err(format!("port {} is privileged, use 1024 or higher", self.port).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn privileged_ports_are_rejected() {
        let config = ServiceConfig {
            host: "127.0.0.1".into(),
            port: 80,
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            host: "127.0.0.1".into(),
            port: 1024,
        };
        assert!(config.validate().is_ok());
    }
}
