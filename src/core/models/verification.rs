//! Verification request model

use super::user::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's application to change platform role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Request identifier
    pub id: Uuid,
    /// External identifier of the applying user
    pub user_uuid: Uuid,
    /// Role the user is applying for
    pub requested_role: UserRole,
    /// Free-text justification supplied by the applicant
    pub justification: String,
    /// Optional URL pointing at supporting evidence (demo reel, registry entry)
    pub evidence_url: Option<String>,
    /// Request state
    pub status: RequestStatus,
    /// Note recorded by the resolving administrator
    pub admin_note: Option<String>,
    /// Submission timestamp
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// Resolution timestamp, set when the request leaves the pending state
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Verification request state
///
/// PENDING is the only non-terminal state; ACCEPTED and REJECTED requests
/// are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "PENDING"),
            RequestStatus::Accepted => write!(f, "ACCEPTED"),
            RequestStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "ACCEPTED" => Ok(RequestStatus::Accepted),
            "REJECTED" => Ok(RequestStatus::Rejected),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

impl VerificationRequest {
    /// Create a new pending request
    pub fn new(
        user_uuid: Uuid,
        requested_role: UserRole,
        justification: String,
        evidence_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_uuid,
            requested_role,
            justification,
            evidence_url,
            status: RequestStatus::Pending,
            admin_note: None,
            submitted_at: chrono::Utc::now(),
            resolved_at: None,
        }
    }

    /// Check if the request is still awaiting resolution
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
