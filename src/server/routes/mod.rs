//! HTTP route modules

pub mod auth;
pub mod users;
pub mod verification;

use actix_web::web;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Register all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(auth::register::register))
                    .route("/login", web::post().to(auth::login::login))
                    .route(
                        "/forgot-password",
                        web::post().to(auth::password::forgot_password),
                    )
                    .route(
                        "/reset-password",
                        web::post().to(auth::password::reset_password),
                    )
                    .route("/me", web::get().to(users::me))
                    .route("/uuid/{uuid}", web::get().to(users::by_uuid)),
            )
            .service(
                web::scope("/verifications")
                    .route("", web::post().to(verification::submit))
                    .route("", web::get().to(verification::list))
                    .route("/mine", web::get().to(verification::mine))
                    .route("/{id}", web::get().to(verification::inspect))
                    .route("/{id}/approve", web::put().to(verification::approve))
                    .route("/{id}/reject", web::put().to(verification::reject)),
            ),
    );
}
