//! jobtrack-store: Storage layer for the Job Tracker API
//!
//! This crate provides:
//! - MongoDB storage for users and tracked jobs
//! - Document models with conversions to/from the domain types
//! - Type-safe database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use jobtrack_store::{Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! // Insert a job
//! store.insert_job(&job).await?;
//!
//! // Query jobs
//! let jobs = store.list_jobs(user_id).await?;
//! ```

pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{JobDoc, JobUpdate, NewUser, UserDoc};
pub use store::{Store, StoreConfig};

// Re-export jobtrack-core for downstream crates
pub use jobtrack_core;
