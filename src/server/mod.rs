//! HTTP server and application wiring.
//!
//! This module provides:
//! - The application object with graceful shutdown (`App`)
//! - The route group (homepage, health, metrics, static assets)
//! - Tracing and metrics initialization

mod app;
mod metrics;
mod observability;
mod routes;
mod templates;

pub use app::{App, ServerConfig};
pub use metrics::init_metrics;
pub use observability::init_tracing;
pub use routes::{create_routes_router, route_table, AppState, HealthResponse};
