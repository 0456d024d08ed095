//! Core data types for the Job Tracker API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a tracked job application.
///
/// Wraps a UUID v4, providing type safety to distinguish job IDs from other
/// UUID-based identifiers in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Creates a new random JobId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a JobId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a user account.
///
/// Wraps a UUID v4, providing type safety to distinguish user IDs from
/// other UUID-based identifiers in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random UserId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Job Types
// ============================================================================

/// Lifecycle status of a tracked job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Application submitted, no response yet.
    Applied,
    /// In the interview process.
    Interviewing,
    /// An offer was extended.
    Offer,
    /// Application was rejected.
    Rejected,
    /// Candidate withdrew the application.
    Withdrawn,
}

impl JobStatus {
    /// Returns the canonical lowercase name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interviewing => "interviewing",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        Self::Applied
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = JobStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(Self::Applied),
            "interviewing" => Ok(Self::Interviewing),
            "offer" => Ok(Self::Offer),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(JobStatusParseError(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown job status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatusParseError(pub String);

impl fmt::Display for JobStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown job status: {}", self.0)
    }
}

impl std::error::Error for JobStatusParseError {}

/// A tracked job application.
///
/// Jobs belong to exactly one user; the server scopes every query and
/// mutation to the authenticated user's `UserId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier.
    pub id: JobId,
    /// Owner of this record.
    pub user_id: UserId,
    /// Company the application was sent to.
    pub company: String,
    /// Position title.
    pub title: String,
    /// Current application status.
    pub status: JobStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the record was created.
    pub created: DateTime<Utc>,
    /// When the record was last updated.
    pub updated: DateTime<Utc>,
}

impl Job {
    /// Creates a new job in the `Applied` state, owned by `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, company: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            user_id,
            company: company.into(),
            title: title.into(),
            status: JobStatus::Applied,
            notes: None,
            created: now,
            updated: now,
        }
    }
}

// ============================================================================
// User Types
// ============================================================================

/// A user account, as seen by the API layer.
///
/// The password hash is deliberately absent here; it lives on the storage
/// document and never crosses into API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Login name, unique per account.
    pub username: String,
    /// When the account was created.
    pub created: DateTime<Utc>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_roundtrip() {
        let id = JobId::new();
        let parsed: JobId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_serde_transparent() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Transparent newtype serializes as the bare UUID string.
        assert_eq!(json, format!("\"{}\"", id.0));
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn job_status_roundtrip() {
        for status in [
            JobStatus::Applied,
            JobStatus::Interviewing,
            JobStatus::Offer,
            JobStatus::Rejected,
            JobStatus::Withdrawn,
        ] {
            let parsed: JobStatus = status.as_str().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn job_status_serde_snake_case() {
        let json = serde_json::to_string(&JobStatus::Interviewing).unwrap();
        assert_eq!(json, "\"interviewing\"");
        let parsed: JobStatus = serde_json::from_str("\"offer\"").unwrap();
        assert_eq!(parsed, JobStatus::Offer);
    }

    #[test]
    fn job_status_parse_unknown() {
        let err = "ghosted".parse::<JobStatus>().unwrap_err();
        assert_eq!(err.0, "ghosted");
    }

    #[test]
    fn job_new_defaults() {
        let user = UserId::new();
        let job = Job::new(user, "Acme", "Platform Engineer");
        assert_eq!(job.user_id, user);
        assert_eq!(job.status, JobStatus::Applied);
        assert!(job.notes.is_none());
        assert_eq!(job.created, job.updated);
    }

    #[test]
    fn job_serde_roundtrip() {
        let job = Job::new(UserId::new(), "Acme", "Platform Engineer");
        let json = serde_json::to_string(&job).unwrap();
        let parsed: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(job, parsed);
    }
}
