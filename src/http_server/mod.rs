//! # Status HTTP Server Module
//!
//! Axum server exposing the status report.
//!
//! # Endpoints
//!
//! - `/` - HTML status page (any method)
//! - `/status.json` - The same snapshot as JSON
//! - `/health` - Liveness check

pub mod config;
pub mod server;
pub mod status_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
