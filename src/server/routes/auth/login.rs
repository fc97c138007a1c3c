//! User login endpoint

use super::models::{LoginRequest, LoginResponse};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::info;

/// Authenticate and mint a bearer token.
///
/// Failures surface as an undifferentiated bad request so the response does
/// not reveal whether the login identifier exists.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    info!("Login attempt");

    let (user, token) = state.auth.login(&request.email, &request.password).await?;

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        uuid: user.uuid,
        username: user.username,
        display_name: user.display_name,
        role: user.role,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
