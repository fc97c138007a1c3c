//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::middleware::{RequestGate, RequestId};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::database::Database;
use crate::storage::IdentityStore;
use crate::utils::error::{AppError, Result};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer as ActixHttpServer};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server over the configured database
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let database = Database::connect(&config.database).await?;
        let store: Arc<dyn IdentityStore> = Arc::new(database);
        let state = AppState::new(config.clone(), store)?;

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Bind and run until shutdown
    pub async fn start(self) -> Result<()> {
        let state = web::Data::new(self.state);
        let host = self.config.host.clone();
        let port = self.config.port;

        info!("HTTP server listening on {}:{}", host, port);

        ActixHttpServer::new(move || {
            let cors = build_cors(&state.config.server);

            App::new()
                .app_data(state.clone())
                .wrap(RequestGate)
                .wrap(cors)
                .wrap(RequestId)
                .wrap(Logger::default())
                .configure(routes::configure)
                .route("/health", web::get().to(health_check))
        })
        .bind((host, port))
        .map_err(AppError::Io)?
        .run()
        .await
        .map_err(AppError::Io)
    }
}

fn build_cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default();

    if config.cors_allowed_origins.is_empty() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.cors_allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

/// Build and run the server from a validated configuration
pub async fn run_server(config: Config) -> Result<()> {
    HttpServer::new(&config).await?.start().await
}
