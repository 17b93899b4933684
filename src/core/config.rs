//! Configuration management for the tool server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::dispatch::DispatchMode;
use super::error::{Error, Result};
use super::transport::HttpConfig;

/// Main configuration structure for the tool server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,

    /// Request dispatch configuration.
    pub dispatch: DispatchConfig,

    /// Bearer token authentication configuration.
    pub auth: AuthConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported in logs and health output.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Routing strategy for tool calls.
    pub mode: DispatchMode,
}

/// Configuration for bearer token authentication.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token the platform must present as `Authorization: Bearer <token>`.
    /// When unset, requests are not authenticated.
    pub bearer_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "opal-tools-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `OPAL_LOG_LEVEL` and `OPAL_LOG_TIMESTAMPS`.
    ///
    /// Kept separate from [`Config::from_env`] so logging can be installed
    /// before the rest of the configuration reports anything.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();

        if let Ok(level) = std::env::var("OPAL_LOG_LEVEL") {
            logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("OPAL_LOG_TIMESTAMPS") {
            logging.with_timestamps =
                timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        logging
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `OPAL_`.
    /// For example: `OPAL_SERVER_NAME`, `OPAL_LOG_LEVEL`.
    /// An unrecognized `OPAL_DISPATCH_MODE` is a configuration error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self {
            logging: LoggingConfig::from_env(),
            ..Self::default()
        };

        if let Ok(name) = std::env::var("OPAL_SERVER_NAME") {
            config.server.name = name;
        }

        config.transport = HttpConfig::from_env();

        if let Ok(mode) = std::env::var("OPAL_DISPATCH_MODE") {
            config.dispatch.mode = mode
                .parse()
                .map_err(|e| Error::config(format!("OPAL_DISPATCH_MODE: {}", e)))?;
        }

        match std::env::var("OPAL_BEARER_TOKEN") {
            Ok(token) if !token.trim().is_empty() => {
                config.auth.bearer_token = Some(token);
                info!("Bearer token authentication enabled");
            }
            _ => warn!(
                "OPAL_BEARER_TOKEN not set - tool endpoints accept unauthenticated requests"
            ),
        }

        Ok(config)
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }
        if self.transport.port == 0 {
            return Err(Error::config("HTTP port must be non-zero"));
        }
        Ok(())
    }
}
