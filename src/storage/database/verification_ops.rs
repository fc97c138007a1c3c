use crate::core::models::user::UserRole;
use crate::core::models::verification::{RequestStatus, VerificationRequest};
use crate::utils::error::{AppError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::entities::{self, user, verification_request};
use super::Database;

impl Database {
    /// Insert a new verification request, re-checking the one-pending
    /// invariant inside the transaction
    pub(super) async fn insert_request(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationRequest> {
        debug!("Creating verification request for user: {}", request.user_uuid);

        let txn = self.db.begin().await.map_err(AppError::Database)?;

        let pending = entities::VerificationRequest::find()
            .filter(verification_request::Column::UserUuid.eq(request.user_uuid))
            .filter(verification_request::Column::Status.eq(RequestStatus::Pending.to_string()))
            .one(&txn)
            .await
            .map_err(AppError::Database)?;

        if pending.is_some() {
            txn.rollback().await.map_err(AppError::Database)?;
            return Err(AppError::PendingRequestExists);
        }

        let active_model = verification_request::Model::from_domain_request(request);
        entities::VerificationRequest::insert(active_model)
            .exec(&txn)
            .await
            .map_err(AppError::Database)?;

        txn.commit().await.map_err(AppError::Database)?;
        Ok(request.clone())
    }

    /// Find a request by id
    pub(super) async fn query_request(
        &self,
        id: uuid::Uuid,
    ) -> Result<Option<VerificationRequest>> {
        let model = entities::VerificationRequest::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.map(|m| m.to_domain_request()))
    }

    /// Find a user's pending request
    pub(super) async fn query_pending_by_user(
        &self,
        user_uuid: uuid::Uuid,
    ) -> Result<Option<VerificationRequest>> {
        let model = entities::VerificationRequest::find()
            .filter(verification_request::Column::UserUuid.eq(user_uuid))
            .filter(verification_request::Column::Status.eq(RequestStatus::Pending.to_string()))
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.map(|m| m.to_domain_request()))
    }

    /// List requests, optionally filtered by status
    pub(super) async fn query_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<VerificationRequest>> {
        let mut query = entities::VerificationRequest::find()
            .order_by_asc(verification_request::Column::SubmittedAt);

        if let Some(status) = status {
            query = query.filter(verification_request::Column::Status.eq(status.to_string()));
        }

        let models = query.all(&self.db).await.map_err(AppError::Database)?;
        Ok(models.iter().map(|m| m.to_domain_request()).collect())
    }

    /// List all requests submitted by a user
    pub(super) async fn query_requests_for_user(
        &self,
        user_uuid: uuid::Uuid,
    ) -> Result<Vec<VerificationRequest>> {
        let models = entities::VerificationRequest::find()
            .filter(verification_request::Column::UserUuid.eq(user_uuid))
            .order_by_asc(verification_request::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(models.iter().map(|m| m.to_domain_request()).collect())
    }

    /// Accept a pending request and apply the role change to its owner.
    ///
    /// The status column is the serialization point: the conditional
    /// update_many is a compare-and-set, so of two concurrent resolvers
    /// exactly one sees rows_affected == 1.
    pub(super) async fn resolve_request_accepted(
        &self,
        request_id: uuid::Uuid,
        new_role: UserRole,
    ) -> Result<VerificationRequest> {
        debug!("Approving verification request: {}", request_id);

        let txn = self.db.begin().await.map_err(AppError::Database)?;

        let request = entities::VerificationRequest::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::RequestNotFound(request_id))?;

        let now = chrono::Utc::now();
        let updated = entities::VerificationRequest::update_many()
            .col_expr(
                verification_request::Column::Status,
                Expr::value(RequestStatus::Accepted.to_string()),
            )
            .col_expr(
                verification_request::Column::ResolvedAt,
                Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(now))),
            )
            .filter(verification_request::Column::Id.eq(request_id))
            .filter(verification_request::Column::Status.eq(RequestStatus::Pending.to_string()))
            .exec(&txn)
            .await
            .map_err(AppError::Database)?;

        if updated.rows_affected == 0 {
            txn.rollback().await.map_err(AppError::Database)?;
            return Err(AppError::NotPending);
        }

        let mut owner: user::ActiveModel = entities::User::find_by_id(request.user_uuid)
            .one(&txn)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::not_found("User for verification request"))?
            .into();

        owner.role = Set(new_role.to_string());
        owner.verified = Set(true);
        owner.updated_at = Set(now.into());
        owner.update(&txn).await.map_err(AppError::Database)?;

        let resolved = entities::VerificationRequest::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::RequestNotFound(request_id))?;

        txn.commit().await.map_err(AppError::Database)?;
        Ok(resolved.to_domain_request())
    }

    /// Reject a pending request, recording the admin note. Same
    /// compare-and-set discipline as approval; the owner row is untouched.
    pub(super) async fn resolve_request_rejected(
        &self,
        request_id: uuid::Uuid,
        admin_note: &str,
    ) -> Result<VerificationRequest> {
        debug!("Rejecting verification request: {}", request_id);

        let txn = self.db.begin().await.map_err(AppError::Database)?;

        entities::VerificationRequest::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::RequestNotFound(request_id))?;

        let now = chrono::Utc::now();
        let updated = entities::VerificationRequest::update_many()
            .col_expr(
                verification_request::Column::Status,
                Expr::value(RequestStatus::Rejected.to_string()),
            )
            .col_expr(
                verification_request::Column::AdminNote,
                Expr::value(Some(admin_note.to_string())),
            )
            .col_expr(
                verification_request::Column::ResolvedAt,
                Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(now))),
            )
            .filter(verification_request::Column::Id.eq(request_id))
            .filter(verification_request::Column::Status.eq(RequestStatus::Pending.to_string()))
            .exec(&txn)
            .await
            .map_err(AppError::Database)?;

        if updated.rows_affected == 0 {
            txn.rollback().await.map_err(AppError::Database)?;
            return Err(AppError::NotPending);
        }

        let resolved = entities::VerificationRequest::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::RequestNotFound(request_id))?;

        txn.commit().await.map_err(AppError::Database)?;
        Ok(resolved.to_domain_request())
    }
}
