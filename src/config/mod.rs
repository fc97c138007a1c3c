//! Configuration management
//!
//! Typed configuration loaded from a YAML file with environment-variable
//! overrides. Validation runs at startup; an unusable signing secret refuses
//! to start the service.

pub mod models;

pub use models::{AuthConfig, DatabaseConfig, ServerConfig};

use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(config)
    }

    /// Load configuration, preferring the given file and applying environment
    /// overrides on top. Validation errors are fatal to the caller.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment-variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("SCENICO_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SCENICO_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| AppError::config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(db_url) = env::var("DATABASE_URL") {
            self.database.url = db_url;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(expiration) = env::var("JWT_EXPIRATION_MS") {
            self.auth.jwt_expiration_ms = expiration
                .parse()
                .map_err(|e| AppError::config(format!("Invalid JWT expiration: {}", e)))?;
        }
        Ok(())
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.auth
            .validate()
            .map_err(AppError::Config)?;
        self.server
            .validate()
            .map_err(AppError::Config)?;
        Ok(())
    }
}
