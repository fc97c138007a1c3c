//! Standalone request handlers

use crate::server::state::AppState;
use actix_web::{web, HttpResponse};
use tracing::error;

/// Liveness probe
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.store.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => {
            error!("Storage health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "degraded" }))
        }
    }
}
