use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// External identifier, assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Email address (unique, login identifier)
    #[sea_orm(unique)]
    pub email: String,

    /// Password hash
    pub password_hash: String,

    /// Display name (optional)
    pub display_name: Option<String>,

    /// Platform role
    pub role: String,

    /// Verification flag
    pub verified: bool,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Verification requests submitted by this user
    #[sea_orm(has_many = "super::verification_request::Entity")]
    VerificationRequests,

    /// Password reset tokens relation
    #[sea_orm(has_many = "super::password_reset_token::Entity")]
    PasswordResetTokens,
}

impl Related<super::verification_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationRequests.def()
    }
}

impl Related<super::password_reset_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PasswordResetTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between SeaORM model and the domain model
impl Model {
    /// Convert SeaORM model to the domain user model
    pub fn to_domain_user(&self) -> crate::core::models::user::User {
        use crate::core::models::user::{User, UserRole};

        User {
            uuid: self.uuid,
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            password_hash: self.password_hash.clone(),
            role: UserRole::from_str(&self.role).unwrap_or(UserRole::User),
            verified: self.verified,
            created_at: self.created_at.to_utc(),
            updated_at: self.updated_at.to_utc(),
        }
    }

    /// Convert the domain user model to a SeaORM active model
    pub fn from_domain_user(user: &crate::core::models::user::User) -> ActiveModel {
        ActiveModel {
            uuid: Set(user.uuid),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            display_name: Set(user.display_name.clone()),
            role: Set(user.role.to_string()),
            verified: Set(user.verified),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
