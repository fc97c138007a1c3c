//! Error handling for the service
//!
//! This module defines all error types used throughout the backend.

use crate::core::models::user::UserRole;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Login failure; unknown-login and wrong-secret are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token signature or structure is invalid
    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    /// Token is well-formed but past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// A claim the issuer always sets is absent
    #[error("Token is missing the '{0}' claim")]
    MissingClaim(&'static str),

    /// Role application for a role the identity already holds
    #[error("Role {0} is already assigned")]
    RoleAlreadyHeld(UserRole),

    /// Identity already has a pending verification request
    #[error("A pending verification request already exists")]
    PendingRequestExists,

    /// The requested role change is not a legal transition
    #[error("Role transition {from} -> {to} is not allowed")]
    TransitionDenied { from: UserRole, to: UserRole },

    /// Rejection requires a non-empty admin note
    #[error("A reason is required to reject a verification request")]
    MissingReason,

    /// Request is not in the pending state
    #[error("Verification request is not pending")]
    NotPending,

    /// No verification request with the given id
    #[error("Verification request not found: {0}")]
    RequestNotFound(Uuid),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or unusable authentication on a protected route
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::InvalidCredentials => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            AppError::TokenInvalid(_) | AppError::TokenExpired | AppError::MissingClaim(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
            ),
            AppError::RoleAlreadyHeld(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "ROLE_ALREADY_HELD",
                self.to_string(),
            ),
            AppError::PendingRequestExists => (
                actix_web::http::StatusCode::CONFLICT,
                "PENDING_REQUEST_EXISTS",
                self.to_string(),
            ),
            AppError::TransitionDenied { .. } => (
                actix_web::http::StatusCode::FORBIDDEN,
                "TRANSITION_DENIED",
                self.to_string(),
            ),
            AppError::MissingReason => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "MISSING_REASON",
                self.to_string(),
            ),
            AppError::NotPending => (
                actix_web::http::StatusCode::CONFLICT,
                "NOT_PENDING",
                self.to_string(),
            ),
            AppError::RequestNotFound(_) | AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            AppError::Conflict(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "CONFLICT",
                self.to_string(),
            ),
            AppError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            AppError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            AppError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            AppError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            AppError::Database(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

/// Helper functions for creating specific errors
impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
