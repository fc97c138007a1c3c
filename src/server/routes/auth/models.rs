//! Request and response models for authentication endpoints

use crate::core::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Forgot password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset password request
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub uuid: uuid::Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub role: UserRole,
}

/// User response (without sensitive data)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub uuid: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

/// Public profile projection, safe to expose without authentication
#[derive(Debug, Serialize)]
pub struct PublicUserResponse {
    pub uuid: uuid::Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub verified: bool,
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid,
            username: user.username,
            display_name: user.display_name,
            role: user.role,
            verified: user.verified,
        }
    }
}
