//! Password reset endpoints

use super::models::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::debug;

/// Start a password reset.
///
/// Answers identically for known and unknown logins; the generated token
/// travels through the mail collaborator, never through this response.
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse> {
    let issued = state
        .auth
        .request_password_reset(&request.email)
        .await?
        .is_some();
    debug!("Password reset requested, token issued: {}", issued);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "If the account exists, reset instructions have been sent".to_string(),
    )))
}

/// Complete a password reset with a previously issued token
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse> {
    state
        .auth
        .reset_password(&request.token, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Password has been updated".to_string(),
    )))
}
