//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::verification::VerificationService;
use crate::storage::IdentityStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Role verification workflow
    pub verification: Arc<VerificationService>,
    /// Storage backend
    pub store: Arc<dyn IdentityStore>,
}

impl AppState {
    /// Create a new AppState over the given store
    pub fn new(config: Config, store: Arc<dyn IdentityStore>) -> Result<Self> {
        let auth = AuthSystem::new(&config.auth, store.clone())?;
        let verification = VerificationService::new(store.clone());

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            verification: Arc::new(verification),
            store,
        })
    }
}
