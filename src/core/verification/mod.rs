//! Verification workflow
//!
//! The request/approve/reject state machine driving role changes. Requests
//! move PENDING -> ACCEPTED or PENDING -> REJECTED and never leave a terminal
//! state. Resolution is serialized per request by the store's pending-state
//! compare-and-set.


use crate::core::models::user::{User, UserRole};
use crate::core::models::verification::{RequestStatus, VerificationRequest};
use crate::core::policy;
use crate::storage::IdentityStore;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Role verification workflow service
#[derive(Clone)]
pub struct VerificationService {
    store: Arc<dyn IdentityStore>,
}

impl VerificationService {
    /// Create a new workflow service over the given store
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Submit a role application for the given user.
    ///
    /// Creation has no role gate beyond the no-op check; legality of the
    /// transition is judged at resolution time.
    pub async fn submit(
        &self,
        user: &User,
        requested_role: UserRole,
        justification: String,
        evidence_url: Option<String>,
    ) -> Result<VerificationRequest> {
        if justification.trim().is_empty() {
            return Err(AppError::validation("A justification is required"));
        }
        if requested_role == user.role {
            return Err(AppError::RoleAlreadyHeld(requested_role));
        }
        if self.store.find_pending_by_user(user.uuid).await?.is_some() {
            return Err(AppError::PendingRequestExists);
        }

        let request =
            VerificationRequest::new(user.uuid, requested_role, justification, evidence_url);
        let request = self.store.create_request(&request).await?;

        info!(
            "Verification request {} submitted: {} applies for {}",
            request.id, user.uuid, requested_role
        );
        Ok(request)
    }

    /// Approve a pending request, applying the role change to its owner.
    ///
    /// The identity mutation (role, verified, audit timestamp) and the
    /// request resolution commit together inside the store.
    pub async fn approve(&self, request_id: Uuid, acting: &User) -> Result<VerificationRequest> {
        let request = self
            .store
            .find_request(request_id)
            .await?
            .ok_or(AppError::RequestNotFound(request_id))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::NotPending);
        }

        let owner = self
            .store
            .find_user_by_uuid(request.user_uuid)
            .await?
            .ok_or_else(|| AppError::not_found("User for verification request"))?;

        if !policy::is_allowed(owner.role, request.requested_role, acting.role) {
            debug!(
                "Transition {} -> {} denied for acting role {}",
                owner.role, request.requested_role, acting.role
            );
            return Err(AppError::TransitionDenied {
                from: owner.role,
                to: request.requested_role,
            });
        }

        let resolved = self
            .store
            .approve_request(request_id, request.requested_role)
            .await?;

        info!(
            "Verification request {} approved by {}: {} is now {}",
            request_id, acting.uuid, owner.uuid, request.requested_role
        );
        Ok(resolved)
    }

    /// Reject a pending request with a mandatory admin note. The owner's
    /// role and verified flag stay untouched.
    pub async fn reject(
        &self,
        request_id: Uuid,
        acting: &User,
        admin_note: &str,
    ) -> Result<VerificationRequest> {
        if admin_note.trim().is_empty() {
            return Err(AppError::MissingReason);
        }

        let request = self
            .store
            .find_request(request_id)
            .await?
            .ok_or(AppError::RequestNotFound(request_id))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::NotPending);
        }

        let resolved = self
            .store
            .reject_request(request_id, admin_note.trim())
            .await?;

        info!(
            "Verification request {} rejected by {}",
            request_id, acting.uuid
        );
        Ok(resolved)
    }

    /// List requests, optionally filtered by status
    pub async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<VerificationRequest>> {
        self.store.list_requests(status).await
    }

    /// List the requests a user has submitted
    pub async fn list_for_user(&self, user_uuid: Uuid) -> Result<Vec<VerificationRequest>> {
        self.store.list_requests_for_user(user_uuid).await
    }

    /// Fetch a single request
    pub async fn get(&self, request_id: Uuid) -> Result<VerificationRequest> {
        self.store
            .find_request(request_id)
            .await?
            .ok_or(AppError::RequestNotFound(request_id))
    }
}
