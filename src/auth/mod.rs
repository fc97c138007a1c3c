//! Authentication system
//!
//! Credential verification, registration, login and token issuance.

pub mod jwt;
pub mod password;

use crate::config::AuthConfig;
use crate::core::models::user::User;
use crate::storage::IdentityStore;
use crate::utils::crypto;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage for user data
    store: Arc<dyn IdentityStore>,
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, store: Arc<dyn IdentityStore>) -> Result<Self> {
        info!("Initializing authentication system");

        let jwt = Arc::new(jwt::JwtHandler::new(config)?);

        Ok(Self {
            config: Arc::new(config.clone()),
            store,
            jwt,
        })
    }

    /// Register a new user with the default role
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        display_name: Option<String>,
    ) -> Result<User> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters long",
            ));
        }

        info!("Registering user: {}", username);

        let password_hash = crypto::hash_password(&password)?;
        let mut user = User::new(username, email, password_hash);
        user.display_name = display_name;

        self.store.create_user(&user).await
    }

    /// Verify a login identifier and secret against stored credentials.
    ///
    /// Unknown login and wrong secret produce the same `InvalidCredentials`
    /// error; the distinction exists only at debug log level.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = match self.store.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Login attempt for unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !crypto::verify_password(password, &user.password_hash)? {
            debug!("Password mismatch for user: {}", user.uuid);
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Pass-through lookup by login identifier, used by password-reset flows
    pub async fn lookup_by_login(&self, email: &str) -> Result<Option<User>> {
        self.store.find_user_by_email(email).await
    }

    /// Authenticate and mint a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self.authenticate(email, password).await?;
        let token = self.jwt.issue(&user)?;

        info!("User logged in: {}", user.uuid);
        Ok((user, token))
    }

    /// Get the JWT handler
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }

    /// Get authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
