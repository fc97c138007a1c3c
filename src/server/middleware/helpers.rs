//! Helper functions for middleware and route guards

use crate::core::models::user::{User, UserRole};
use crate::utils::error::{AppError, Result};
use actix_web::{HttpMessage, HttpRequest};

/// Authenticated caller attached to a request by the gate.
///
/// The gate middleware is the only writer; everything downstream reads it
/// through the guard functions below.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    /// The authenticated user
    pub user: User,
    /// Derived authority string ("ROLE_" + role)
    pub authority: String,
}

impl AuthenticatedPrincipal {
    /// Build a principal for the given user
    pub fn new(user: User) -> Self {
        let authority = user.role.authority();
        Self { user, authority }
    }
}

/// Check if a path matches the configured unauthenticated allow-list
pub fn is_public_route(path: &str, public_routes: &[String]) -> bool {
    public_routes
        .iter()
        .any(|route| path.starts_with(route.as_str()))
}

/// Guard: the request must carry an authenticated principal
pub fn current_user(req: &HttpRequest) -> Result<User> {
    req.extensions()
        .get::<AuthenticatedPrincipal>()
        .map(|principal| principal.user.clone())
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

/// Guard: the request must carry a principal holding the given role
pub fn require_role(req: &HttpRequest, role: UserRole) -> Result<User> {
    let principal = req
        .extensions()
        .get::<AuthenticatedPrincipal>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if principal.user.role != role {
        return Err(AppError::forbidden(format!(
            "Requires authority {}",
            role.authority()
        )));
    }

    Ok(principal.user)
}
