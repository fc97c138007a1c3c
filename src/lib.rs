//! # Scénico backend
//!
//! Backend service for the Scénico artist platform. The interesting parts
//! are token-based authentication (issuing, validating and decoding signed
//! bearer tokens, plus the per-request gate that turns a token into an
//! authenticated principal) and the role verification workflow (a
//! request/approve/reject state machine through which users change platform
//! role, with admin-only decisioning).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use scenico::config::Config;
//! use scenico::server;
//!
//! #[tokio::main]
//! async fn main() -> scenico::Result<()> {
//!     let config = Config::load(Some(std::path::Path::new("config/server.yaml"))).await?;
//!     server::run_server(config).await
//! }
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{AppError, Result};
