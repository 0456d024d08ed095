//! Document models for the storage layer.
//!
//! These types map directly to MongoDB documents and are separate from the
//! domain types in jobtrack-core, so the wire representation (binary UUIDs,
//! BSON datetimes, status strings) can evolve without touching the domain.

use bson::serde_helpers::{chrono_datetime_as_bson_datetime, uuid_1_as_binary};
use chrono::{DateTime, Utc};
use jobtrack_core::{Job, JobId, JobStatus, User, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// Document in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    /// UserId stored as a BSON binary UUID.
    #[serde(rename = "_id", with = "uuid_1_as_binary")]
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created: DateTime<Utc>,
}

impl UserDoc {
    /// Typed user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }
}

impl From<&UserDoc> for User {
    fn from(doc: &UserDoc) -> Self {
        Self {
            id: UserId::from_uuid(doc.id),
            username: doc.username.clone(),
            created: doc.created,
        }
    }
}

/// Input for creating a new user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    /// Materialize a full document with a fresh id and timestamp.
    #[must_use]
    pub fn into_doc(self) -> UserDoc {
        UserDoc {
            id: Uuid::new_v4(),
            username: self.username,
            password_hash: self.password_hash,
            created: Utc::now(),
        }
    }
}

/// Document in the `jobs` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDoc {
    /// JobId stored as a BSON binary UUID.
    #[serde(rename = "_id", with = "uuid_1_as_binary")]
    pub id: Uuid,
    /// Owning user, stored as a BSON binary UUID.
    #[serde(with = "uuid_1_as_binary")]
    pub user_id: Uuid,
    pub company: String,
    pub title: String,
    /// Status stored as its canonical lowercase name.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated: DateTime<Utc>,
}

impl From<&Job> for JobDoc {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.0,
            user_id: job.user_id.0,
            company: job.company.clone(),
            title: job.title.clone(),
            status: job.status.as_str().to_string(),
            notes: job.notes.clone(),
            created: job.created,
            updated: job.updated,
        }
    }
}

impl TryFrom<JobDoc> for Job {
    type Error = StoreError;

    fn try_from(doc: JobDoc) -> Result<Self, Self::Error> {
        let status: JobStatus = doc.status.parse()?;
        Ok(Self {
            id: JobId::from_uuid(doc.id),
            user_id: UserId::from_uuid(doc.user_id),
            company: doc.company,
            title: doc.title,
            status,
            notes: doc.notes,
            created: doc.created,
            updated: doc.updated,
        })
    }
}

/// Partial update applied to a job document.
///
/// `None` fields are left untouched. `notes` uses a nested Option so that
/// `Some(None)` clears the notes while `None` leaves them alone.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: Option<JobStatus>,
    pub notes: Option<Option<String>>,
}

impl JobUpdate {
    /// Whether this update changes anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.title.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_doc_bson_roundtrip() {
        let doc = NewUser {
            username: "alice".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
        .into_doc();

        let raw = bson::to_document(&doc).unwrap();
        // The id must be a binary UUID under "_id", not a string.
        assert!(matches!(raw.get("_id"), Some(bson::Bson::Binary(_))));

        let parsed: UserDoc = bson::from_document(raw).unwrap();
        assert_eq!(parsed.id, doc.id);
        assert_eq!(parsed.username, "alice");
    }

    #[test]
    fn user_doc_converts_to_domain_user() {
        let doc = NewUser {
            username: "alice".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
        .into_doc();

        let user = User::from(&doc);
        assert_eq!(user.id, doc.user_id());
        assert_eq!(user.username, doc.username);
        assert_eq!(user.created, doc.created);

        // The domain type must not leak credentials.
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn job_doc_domain_roundtrip() {
        let job = Job::new(UserId::new(), "Acme", "Platform Engineer");
        let doc = JobDoc::from(&job);
        assert_eq!(doc.status, "applied");

        let back: Job = doc.try_into().unwrap();
        assert_eq!(back, job);
    }

    #[test]
    fn job_doc_invalid_status_rejected() {
        let job = Job::new(UserId::new(), "Acme", "Platform Engineer");
        let mut doc = JobDoc::from(&job);
        doc.status = "ghosted".to_string();

        let err = Job::try_from(doc).unwrap_err();
        assert!(matches!(err, StoreError::InvalidStatus(_)));
    }

    #[test]
    fn job_doc_omits_empty_notes() {
        let job = Job::new(UserId::new(), "Acme", "Platform Engineer");
        let raw = bson::to_document(&JobDoc::from(&job)).unwrap();
        assert!(!raw.contains_key("notes"));
    }

    #[test]
    fn job_update_emptiness() {
        assert!(JobUpdate::default().is_empty());
        let update = JobUpdate {
            status: Some(JobStatus::Offer),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
