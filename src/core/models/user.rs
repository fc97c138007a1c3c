//! User account model and role enumeration

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable external identifier, assigned once at creation
    pub uuid: Uuid,
    /// Username (unique)
    pub username: String,
    /// Email address (unique, used as the login identifier)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Platform role
    pub role: UserRole,
    /// Set when at least one verification request has been approved
    pub verified: bool,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// User role
///
/// Roles are a closed set and every user carries exactly one from creation
/// onward; there is no unassigned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// General user with access to portfolio browsing
    User,
    /// Verified artist able to apply to opportunities
    Artist,
    /// Company or producer able to publish opportunities
    Enterprise,
    /// Platform administrator, moderation and account verification
    Admin,
}

impl UserRole {
    /// All roles, in declaration order
    pub const ALL: [UserRole; 4] = [
        UserRole::User,
        UserRole::Artist,
        UserRole::Enterprise,
        UserRole::Admin,
    ];

    /// Authority string attached to the request principal
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "USER"),
            UserRole::Artist => write!(f, "ARTIST"),
            UserRole::Enterprise => write!(f, "ENTERPRISE"),
            UserRole::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ARTIST" => Ok(UserRole::Artist),
            "ENTERPRISE" => Ok(UserRole::Enterprise),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl User {
    /// Create a new user with a fresh external identifier and the default role
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            username,
            email,
            display_name: None,
            password_hash,
            role: UserRole::User,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user holds the administrator role
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Update the last-modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}
