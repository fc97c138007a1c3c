use crate::core::models::user::User;
use crate::utils::error::{AppError, Result};
use sea_orm::*;
use tracing::debug;

use super::entities::{self, user};
use super::Database;

impl Database {
    /// Insert a new user
    pub(super) async fn insert_user(&self, new_user: &User) -> Result<User> {
        debug!("Creating user: {}", new_user.username);

        let taken = entities::User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(new_user.email.as_str()))
                    .add(user::Column::Username.eq(new_user.username.as_str())),
            )
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        if let Some(existing) = taken {
            if existing.email == new_user.email {
                return Err(AppError::conflict("Email is already registered"));
            }
            return Err(AppError::conflict("Username is already taken"));
        }

        let active_model = user::Model::from_domain_user(new_user);
        entities::User::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(new_user.clone())
    }

    /// Find user by email
    pub(super) async fn query_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let user_model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Find user by external identifier
    pub(super) async fn query_user_by_uuid(&self, uuid: uuid::Uuid) -> Result<Option<User>> {
        debug!("Finding user by uuid: {}", uuid);

        let user_model = entities::User::find_by_id(uuid)
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Update user password hash
    pub(super) async fn set_user_password(
        &self,
        uuid: uuid::Uuid,
        password_hash: &str,
    ) -> Result<()> {
        debug!("Updating password for user: {}", uuid);

        let mut active_model: user::ActiveModel = entities::User::find_by_id(uuid)
            .one(&self.db)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::not_found("User not found"))?
            .into();

        active_model.password_hash = Set(password_hash.to_string());
        active_model.updated_at = Set(chrono::Utc::now().into());

        active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
