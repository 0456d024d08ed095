//! jobtrack-server: HTTP API server for the Job Tracker
//!
//! This crate provides:
//! - REST API endpoints for auth (`/api/auth`) and jobs (`/api/jobs`)
//! - JWT authentication and Argon2 password hashing
//! - A WebSocket notification channel (`/ws`) for real-time job events
//! - A root readiness endpoint (`GET /`)
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling (blanket for REST, origin-restricted for the
//!   notification channel)
//! - Request ID generation
//! - JSON error responses

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use events::NotificationHub;
pub use state::AppState;

// Re-export dependent crates
pub use jobtrack_core;
pub use jobtrack_store;
