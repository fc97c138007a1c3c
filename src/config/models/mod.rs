//! Configuration models

mod auth;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use server::ServerConfig;
pub use storage::DatabaseConfig;
