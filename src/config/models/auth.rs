//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret; at least 32 bytes, no default
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in milliseconds
    #[serde(default = "default_jwt_expiration_ms")]
    pub jwt_expiration_ms: u64,
    /// Route prefixes reachable without authentication
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration_ms: default_jwt_expiration_ms(),
            public_routes: default_public_routes(),
        }
    }
}

impl AuthConfig {
    /// Minimum accepted signing-secret length in bytes
    pub const MIN_SECRET_LEN: usize = 32;

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.is_empty() {
            return Err("JWT secret is not configured".to_string());
        }

        if self.jwt_secret.len() < Self::MIN_SECRET_LEN {
            return Err(format!(
                "JWT secret must be at least {} characters long",
                Self::MIN_SECRET_LEN
            ));
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use placeholder values. Generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_expiration_ms == 0 {
            return Err("JWT expiration must be greater than zero".to_string());
        }

        if self.jwt_expiration_ms > 30 * 24 * 3_600_000 {
            return Err("JWT expiration should not exceed 30 days".to_string());
        }

        Ok(())
    }
}

fn default_jwt_expiration_ms() -> u64 {
    // 24 hours
    86_400_000
}

fn default_public_routes() -> Vec<String> {
    [
        "/health",
        "/api/v1/users/register",
        "/api/v1/users/login",
        "/api/v1/users/forgot-password",
        "/api/v1/users/reset-password",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
