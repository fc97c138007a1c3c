//! Shared test infrastructure

use scenico::config::{AuthConfig, Config, DatabaseConfig};
use scenico::core::models::user::{User, UserRole};
use scenico::storage::database::Database;
use scenico::storage::IdentityStore;
use scenico::utils::crypto;

/// Password used by all seeded test users
pub const TEST_PASSWORD: &str = "correct-horse";

/// Create an isolated in-memory SQLite database.
///
/// In-memory SQLite exists per connection, so the pool is capped at one.
pub async fn test_database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_timeout: 5,
    };

    Database::connect(&config)
        .await
        .expect("Failed to create in-memory test database")
}

/// Service configuration with a usable signing secret
pub fn test_config() -> Config {
    Config {
        auth: AuthConfig {
            jwt_secret: "test_secret_key_for_testing_only".to_string(),
            ..AuthConfig::default()
        },
        ..Config::default()
    }
}

/// Insert a user with the given role directly into the store
pub async fn seed_user(store: &dyn IdentityStore, email: &str, role: UserRole) -> User {
    let mut user = User::new(
        email.split('@').next().unwrap().to_string(),
        email.to_string(),
        crypto::hash_password(TEST_PASSWORD).unwrap(),
    );
    user.role = role;
    store.create_user(&user).await.unwrap()
}
