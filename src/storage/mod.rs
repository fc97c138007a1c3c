//! Persistence boundary
//!
//! The core consumes identity and verification-request storage through the
//! [`IdentityStore`] trait; backends live in submodules.

pub mod database;
pub mod memory;

use crate::core::models::user::{User, UserRole};
use crate::core::models::verification::{RequestStatus, VerificationRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage operations required by the authentication and verification core.
///
/// `create_request`, `approve_request` and `reject_request` are atomic
/// boundaries: the one-pending-per-user check and the pending-state
/// compare-and-set happen inside the store, so of two concurrent callers
/// exactly one wins.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Persist a new user; fails with a conflict when email or username is taken
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Find user by login identifier (email)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find user by external identifier
    async fn find_user_by_uuid(&self, uuid: Uuid) -> Result<Option<User>>;

    /// Replace a user's password hash
    async fn update_user_password(&self, uuid: Uuid, password_hash: &str) -> Result<()>;

    /// Persist a new verification request; fails with `PendingRequestExists`
    /// when the user already has a pending one
    async fn create_request(&self, request: &VerificationRequest) -> Result<VerificationRequest>;

    /// Find a verification request by id
    async fn find_request(&self, id: Uuid) -> Result<Option<VerificationRequest>>;

    /// Find a user's pending request, if any
    async fn find_pending_by_user(&self, user_uuid: Uuid) -> Result<Option<VerificationRequest>>;

    /// List requests, optionally filtered by status
    async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<VerificationRequest>>;

    /// List all requests submitted by a user
    async fn list_requests_for_user(&self, user_uuid: Uuid) -> Result<Vec<VerificationRequest>>;

    /// Resolve a pending request as accepted and apply the role change to its
    /// owner in the same transaction. Fails with `RequestNotFound` or, when
    /// the request has already been resolved, `NotPending`.
    async fn approve_request(
        &self,
        request_id: Uuid,
        new_role: UserRole,
    ) -> Result<VerificationRequest>;

    /// Resolve a pending request as rejected, recording the admin note. The
    /// owner's role and verified flag are untouched.
    async fn reject_request(
        &self,
        request_id: Uuid,
        admin_note: &str,
    ) -> Result<VerificationRequest>;

    /// Store a single-use password reset token, replacing any previous one
    async fn store_reset_token(
        &self,
        user_uuid: Uuid,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()>;

    /// Consume a reset token: returns the owning user when the token exists,
    /// is unexpired and unused, and marks it used
    async fn consume_reset_token(&self, token: &str) -> Result<Option<Uuid>>;

    /// Backend liveness probe
    async fn health_check(&self) -> Result<()>;
}
