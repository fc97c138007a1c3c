//! SeaORM database backend

pub mod entities;
mod token_ops;
mod user_ops;
mod verification_ops;

use crate::config::DatabaseConfig;
use crate::core::models::user::{User, UserRole};
use crate::core::models::verification::{RequestStatus, VerificationRequest};
use crate::storage::IdentityStore;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Database connection wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pub(crate) db: DatabaseConnection,
}

impl Database {
    /// Connect to the configured database and bootstrap the schema
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database");
        debug!("Database URL: {}", sanitize_url(&config.url));

        let mut options = ConnectOptions::new(config.url.as_str());
        options
            .max_connections(config.max_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(false);

        let db = sea_orm::Database::connect(options)
            .await
            .map_err(AppError::Database)?;

        let database = Self { db };
        database.init_schema().await?;

        info!("Database connection established");
        Ok(database)
    }

    /// Create tables from the entity definitions when they do not exist yet
    async fn init_schema(&self) -> Result<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut statements = [
            schema.create_table_from_entity(entities::User),
            schema.create_table_from_entity(entities::VerificationRequest),
            schema.create_table_from_entity(entities::PasswordResetToken),
        ];

        for statement in statements.iter_mut() {
            statement.if_not_exists();
            self.db
                .execute(backend.build(&*statement))
                .await
                .map_err(AppError::Database)?;
        }

        Ok(())
    }

    /// Access the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn sanitize_url(url: &str) -> String {
    if url.starts_with("sqlite:") {
        url.to_string()
    } else {
        "***sanitized***".to_string()
    }
}

#[async_trait]
impl IdentityStore for Database {
    async fn create_user(&self, user: &User) -> Result<User> {
        self.insert_user(user).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.query_user_by_email(email).await
    }

    async fn find_user_by_uuid(&self, uuid: Uuid) -> Result<Option<User>> {
        self.query_user_by_uuid(uuid).await
    }

    async fn update_user_password(&self, uuid: Uuid, password_hash: &str) -> Result<()> {
        self.set_user_password(uuid, password_hash).await
    }

    async fn create_request(&self, request: &VerificationRequest) -> Result<VerificationRequest> {
        self.insert_request(request).await
    }

    async fn find_request(&self, id: Uuid) -> Result<Option<VerificationRequest>> {
        self.query_request(id).await
    }

    async fn find_pending_by_user(&self, user_uuid: Uuid) -> Result<Option<VerificationRequest>> {
        self.query_pending_by_user(user_uuid).await
    }

    async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<VerificationRequest>> {
        self.query_requests(status).await
    }

    async fn list_requests_for_user(&self, user_uuid: Uuid) -> Result<Vec<VerificationRequest>> {
        self.query_requests_for_user(user_uuid).await
    }

    async fn approve_request(
        &self,
        request_id: Uuid,
        new_role: UserRole,
    ) -> Result<VerificationRequest> {
        self.resolve_request_accepted(request_id, new_role).await
    }

    async fn reject_request(
        &self,
        request_id: Uuid,
        admin_note: &str,
    ) -> Result<VerificationRequest> {
        self.resolve_request_rejected(request_id, admin_note).await
    }

    async fn store_reset_token(
        &self,
        user_uuid: Uuid,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        self.insert_reset_token(user_uuid, token, expires_at).await
    }

    async fn consume_reset_token(&self, token: &str) -> Result<Option<Uuid>> {
        self.take_reset_token(token).await
    }

    async fn health_check(&self) -> Result<()> {
        self.db.ping().await.map_err(AppError::Database)
    }
}
