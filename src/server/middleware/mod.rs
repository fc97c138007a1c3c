//! HTTP middleware

pub mod auth;
pub mod helpers;
pub mod request_id;
mod tests;

pub use auth::RequestGate;
pub use helpers::{current_user, require_role, AuthenticatedPrincipal};
pub use request_id::RequestId;
