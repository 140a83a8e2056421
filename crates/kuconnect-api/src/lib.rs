//! # kuconnect-api
//!
//! HTTP API layer for KU Connect built on Axum.
//!
//! Provides the REST endpoints, the WebSocket upgrade, middleware (CORS,
//! request logging, tracing, timeouts), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
