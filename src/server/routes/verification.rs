//! Verification request endpoints
//!
//! Submission is open to any authenticated user; listing and resolution are
//! admin-only.

use crate::core::models::user::UserRole;
use crate::core::models::verification::{RequestStatus, VerificationRequest};
use crate::server::middleware::helpers::{current_user, require_role};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{AppError, Result};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Role application payload
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub requested_role: UserRole,
    pub justification: String,
    pub evidence_url: Option<String>,
}

/// Rejection payload
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub note: String,
}

/// Status filter for listings
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Verification request representation returned by these endpoints
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub id: Uuid,
    pub user_uuid: Uuid,
    pub requested_role: UserRole,
    pub justification: String,
    pub evidence_url: Option<String>,
    pub status: RequestStatus,
    pub admin_note: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<VerificationRequest> for VerificationResponse {
    fn from(request: VerificationRequest) -> Self {
        Self {
            id: request.id,
            user_uuid: request.user_uuid,
            requested_role: request.requested_role,
            justification: request.justification,
            evidence_url: request.evidence_url,
            status: request.status,
            admin_note: request.admin_note,
            submitted_at: request.submitted_at,
            resolved_at: request.resolved_at,
        }
    }
}

/// Submit a role application for the authenticated caller
pub async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SubmitRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let body = body.into_inner();

    let request = state
        .verification
        .submit(&user, body.requested_role, body.justification, body.evidence_url)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(VerificationResponse::from(request))))
}

/// List verification requests, optionally filtered by status (admin-only)
pub async fn list(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    require_role(&req, UserRole::Admin)?;

    let status = query
        .status
        .as_deref()
        .map(RequestStatus::from_str)
        .transpose()
        .map_err(AppError::Validation)?;

    let requests = state.verification.list(status).await?;
    let response: Vec<VerificationResponse> =
        requests.into_iter().map(VerificationResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Inspect a single request (admin-only)
pub async fn inspect(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_role(&req, UserRole::Admin)?;

    let request = state.verification.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerificationResponse::from(request))))
}

/// List the authenticated caller's own applications
pub async fn mine(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = current_user(&req)?;

    let requests = state.verification.list_for_user(user.uuid).await?;
    let response: Vec<VerificationResponse> =
        requests.into_iter().map(VerificationResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Approve a pending request (admin-only)
pub async fn approve(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let admin = require_role(&req, UserRole::Admin)?;

    let resolved = state.verification.approve(path.into_inner(), &admin).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerificationResponse::from(resolved))))
}

/// Reject a pending request with a mandatory note (admin-only)
pub async fn reject(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<RejectRequest>,
) -> Result<HttpResponse> {
    let admin = require_role(&req, UserRole::Admin)?;

    let resolved = state
        .verification
        .reject(path.into_inner(), &admin, &body.note)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerificationResponse::from(resolved))))
}
