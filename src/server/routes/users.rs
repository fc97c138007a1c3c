//! User endpoints

use crate::server::middleware::helpers::current_user;
use crate::server::routes::auth::models::{PublicUserResponse, UserResponse};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{AppError, Result};
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

/// The authenticated caller's own account
pub async fn me(req: HttpRequest) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Public profile lookup by external identifier
pub async fn by_uuid(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let uuid = path.into_inner();

    let user = state
        .store
        .find_user_by_uuid(uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User not found: {}", uuid)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PublicUserResponse::from(user))))
}
