use crate::utils::error::{AppError, Result};
use sea_orm::*;
use tracing::debug;

use super::entities::{self, password_reset_token};
use super::Database;

impl Database {
    /// Store a password reset token, replacing any previous token for the user
    pub(super) async fn insert_reset_token(
        &self,
        user_uuid: uuid::Uuid,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        debug!("Storing password reset token for user: {}", user_uuid);

        entities::PasswordResetToken::delete_many()
            .filter(password_reset_token::Column::UserUuid.eq(user_uuid))
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        let active_model = password_reset_token::ActiveModel {
            id: NotSet,
            user_uuid: Set(user_uuid),
            token: Set(token.to_string()),
            expires_at: Set(expires_at.into()),
            created_at: Set(chrono::Utc::now().into()),
            used_at: Set(None),
        };

        entities::PasswordResetToken::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    /// Verify and consume a password reset token
    pub(super) async fn take_reset_token(&self, token: &str) -> Result<Option<uuid::Uuid>> {
        debug!("Consuming password reset token");

        let token_model = entities::PasswordResetToken::find()
            .filter(password_reset_token::Column::Token.eq(token))
            .filter(password_reset_token::Column::UsedAt.is_null())
            .filter(password_reset_token::Column::ExpiresAt.gt(chrono::Utc::now()))
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        if let Some(token_model) = token_model {
            let user_uuid = token_model.user_uuid;

            let mut active_model: password_reset_token::ActiveModel = token_model.into();
            active_model.used_at = Set(Some(chrono::Utc::now().into()));
            active_model
                .update(&self.db)
                .await
                .map_err(AppError::Database)?;

            Ok(Some(user_uuid))
        } else {
            Ok(None)
        }
    }
}
