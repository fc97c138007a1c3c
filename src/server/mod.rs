//! HTTP server: state, middleware and routes

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{run_server, HttpServer};
pub use state::AppState;
