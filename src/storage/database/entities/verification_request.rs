use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Verification request database model
///
/// The one-pending-per-user invariant is additionally backed by a unique
/// partial index on (user_uuid) where status = 'PENDING' in managed
/// deployments; the store re-checks it transactionally either way.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "verification_requests")]
pub struct Model {
    /// Request identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// External identifier of the applying user
    pub user_uuid: Uuid,

    /// Role being applied for
    pub requested_role: String,

    /// Free-text justification
    #[sea_orm(column_type = "Text")]
    pub justification: String,

    /// Optional evidence URL
    pub evidence_url: Option<String>,

    /// Request state
    pub status: String,

    /// Note recorded by the resolving administrator
    pub admin_note: Option<String>,

    /// Submission timestamp
    pub submitted_at: DateTimeWithTimeZone,

    /// Resolution timestamp
    pub resolved_at: Option<DateTimeWithTimeZone>,
}

/// Verification request entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserUuid",
        to = "super::user::Column::Uuid"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to the domain request model
    pub fn to_domain_request(&self) -> crate::core::models::verification::VerificationRequest {
        use crate::core::models::user::UserRole;
        use crate::core::models::verification::{RequestStatus, VerificationRequest};

        VerificationRequest {
            id: self.id,
            user_uuid: self.user_uuid,
            requested_role: UserRole::from_str(&self.requested_role).unwrap_or(UserRole::User),
            justification: self.justification.clone(),
            evidence_url: self.evidence_url.clone(),
            status: RequestStatus::from_str(&self.status).unwrap_or(RequestStatus::Pending),
            admin_note: self.admin_note.clone(),
            submitted_at: self.submitted_at.to_utc(),
            resolved_at: self.resolved_at.map(|dt| dt.to_utc()),
        }
    }

    /// Convert the domain request model to a SeaORM active model
    pub fn from_domain_request(
        request: &crate::core::models::verification::VerificationRequest,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(request.id),
            user_uuid: Set(request.user_uuid),
            requested_role: Set(request.requested_role.to_string()),
            justification: Set(request.justification.clone()),
            evidence_url: Set(request.evidence_url.clone()),
            status: Set(request.status.to_string()),
            admin_note: Set(request.admin_note.clone()),
            submitted_at: Set(request.submitted_at.into()),
            resolved_at: Set(request.resolved_at.map(|dt| dt.into())),
        }
    }
}
