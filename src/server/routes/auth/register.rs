//! User registration endpoint

use super::models::{RegisterRequest, UserResponse};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::info;

/// Create a new account with the default role
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    let user = state
        .auth
        .register(
            request.username,
            request.email,
            request.password,
            request.display_name,
        )
        .await?;

    info!("User registered: {}", user.uuid);
    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse::from(user))))
}
