//! In-memory store
//!
//! A single mutex guards all tables, which makes the one-pending check and
//! the pending-state compare-and-set atomic without a database. Backs the
//! workflow and HTTP tests.

use crate::core::models::user::{User, UserRole};
use crate::core::models::verification::{RequestStatus, VerificationRequest};
use crate::storage::IdentityStore;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory [`IdentityStore`] backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    requests: HashMap<Uuid, VerificationRequest>,
    reset_tokens: HashMap<String, ResetToken>,
}

#[derive(Debug)]
struct ResetToken {
    user_uuid: Uuid,
    expires_at: chrono::DateTime<chrono::Utc>,
    used: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<User> {
        let mut inner = self.inner.lock();

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email is already registered"));
        }
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(AppError::conflict("Username is already taken"));
        }

        inner.users.insert(user.uuid, user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.lock();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_uuid(&self, uuid: Uuid) -> Result<Option<User>> {
        let inner = self.inner.lock();
        Ok(inner.users.get(&uuid).cloned())
    }

    async fn update_user_password(&self, uuid: Uuid, password_hash: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        let user = inner
            .users
            .get_mut(&uuid)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        user.password_hash = password_hash.to_string();
        user.touch();
        Ok(())
    }

    async fn create_request(&self, request: &VerificationRequest) -> Result<VerificationRequest> {
        let mut inner = self.inner.lock();

        let has_pending = inner
            .requests
            .values()
            .any(|r| r.user_uuid == request.user_uuid && r.is_pending());
        if has_pending {
            return Err(AppError::PendingRequestExists);
        }

        inner.requests.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn find_request(&self, id: Uuid) -> Result<Option<VerificationRequest>> {
        let inner = self.inner.lock();
        Ok(inner.requests.get(&id).cloned())
    }

    async fn find_pending_by_user(&self, user_uuid: Uuid) -> Result<Option<VerificationRequest>> {
        let inner = self.inner.lock();
        Ok(inner
            .requests
            .values()
            .find(|r| r.user_uuid == user_uuid && r.is_pending())
            .cloned())
    }

    async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<VerificationRequest>> {
        let inner = self.inner.lock();
        let mut requests: Vec<_> = inner
            .requests
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.submitted_at);
        Ok(requests)
    }

    async fn list_requests_for_user(&self, user_uuid: Uuid) -> Result<Vec<VerificationRequest>> {
        let inner = self.inner.lock();
        let mut requests: Vec<_> = inner
            .requests
            .values()
            .filter(|r| r.user_uuid == user_uuid)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.submitted_at);
        Ok(requests)
    }

    async fn approve_request(
        &self,
        request_id: Uuid,
        new_role: UserRole,
    ) -> Result<VerificationRequest> {
        let mut inner = self.inner.lock();

        let request = inner
            .requests
            .get(&request_id)
            .ok_or(AppError::RequestNotFound(request_id))?;
        if !request.is_pending() {
            return Err(AppError::NotPending);
        }
        let user_uuid = request.user_uuid;

        let user = inner
            .users
            .get_mut(&user_uuid)
            .ok_or_else(|| AppError::not_found("User for verification request"))?;
        user.role = new_role;
        user.verified = true;
        user.touch();

        let request = inner
            .requests
            .get_mut(&request_id)
            .ok_or(AppError::RequestNotFound(request_id))?;
        request.status = RequestStatus::Accepted;
        request.resolved_at = Some(chrono::Utc::now());

        Ok(request.clone())
    }

    async fn reject_request(
        &self,
        request_id: Uuid,
        admin_note: &str,
    ) -> Result<VerificationRequest> {
        let mut inner = self.inner.lock();

        let request = inner
            .requests
            .get_mut(&request_id)
            .ok_or(AppError::RequestNotFound(request_id))?;
        if !request.is_pending() {
            return Err(AppError::NotPending);
        }

        request.status = RequestStatus::Rejected;
        request.admin_note = Some(admin_note.to_string());
        request.resolved_at = Some(chrono::Utc::now());

        Ok(request.clone())
    }

    async fn store_reset_token(
        &self,
        user_uuid: Uuid,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.reset_tokens.retain(|_, t| t.user_uuid != user_uuid);
        inner.reset_tokens.insert(
            token.to_string(),
            ResetToken {
                user_uuid,
                expires_at,
                used: false,
            },
        );
        Ok(())
    }

    async fn consume_reset_token(&self, token: &str) -> Result<Option<Uuid>> {
        let mut inner = self.inner.lock();
        match inner.reset_tokens.get_mut(token) {
            Some(entry) if !entry.used && entry.expires_at > chrono::Utc::now() => {
                entry.used = true;
                Ok(Some(entry.user_uuid))
            }
            _ => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
