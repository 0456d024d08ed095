//! jobtrack-core: Core domain types for the Job Tracker API
//!
//! This crate defines the fundamental types shared by the storage layer and
//! the HTTP server:
//!
//! - Typed identifiers (`JobId`, `UserId`)
//! - The `Job` application record and its `JobStatus` lifecycle
//! - The `User` account record (credentials live in the storage layer)
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

pub mod types;

pub use types::{Job, JobId, JobStatus, JobStatusParseError, User, UserId};
