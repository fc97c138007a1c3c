//! Password reset operations

use super::AuthSystem;
use crate::utils::crypto;
use crate::utils::error::{AppError, Result};
use tracing::{debug, info};

/// Reset token validity window
const RESET_TOKEN_TTL_HOURS: i64 = 1;

impl AuthSystem {
    /// Generate a single-use reset token for the given login identifier.
    ///
    /// Returns `None` for unknown logins so callers can answer generically
    /// without leaking account existence. Delivery of the token is the email
    /// collaborator's concern.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>> {
        let user = match self.lookup_by_login(email).await? {
            Some(user) => user,
            None => {
                debug!("Password reset requested for unknown email");
                return Ok(None);
            }
        };

        let token = crypto::generate_token(32);
        let expires_at = chrono::Utc::now() + chrono::Duration::hours(RESET_TOKEN_TTL_HOURS);

        self.store
            .store_reset_token(user.uuid, &token, expires_at)
            .await?;

        info!("Password reset token generated for user: {}", user.uuid);
        Ok(Some(token))
    }

    /// Consume a reset token and replace the user's password
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        if new_password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters long",
            ));
        }

        let user_uuid = self
            .store
            .consume_reset_token(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired reset token"))?;

        let password_hash = crypto::hash_password(new_password)?;
        self.store
            .update_user_password(user_uuid, &password_hash)
            .await?;

        info!("Password reset completed for user: {}", user_uuid);
        Ok(())
    }
}
