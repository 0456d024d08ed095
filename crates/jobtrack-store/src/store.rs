//! Main store implementation for database operations.
//!
//! The `Store` type provides all CRUD operations for users and jobs on top
//! of a MongoDB database.

use bson::doc;
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};

use jobtrack_core::{Job, JobId, UserId};

use crate::error::{StoreError, StoreResult};
use crate::models::{JobDoc, JobUpdate, NewUser, UserDoc};

/// Name of the users collection.
const USERS_COLLECTION: &str = "users";
/// Name of the jobs collection.
const JOBS_COLLECTION: &str = "jobs";

/// Configuration for connecting to the database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection URI.
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Application name reported to the server.
    pub app_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "jobtracker".to_string(),
            app_name: "jobtrack-server".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `MONGODB_URI` - Required connection string
    /// - `MONGODB_DB` - Optional database name, defaults to "jobtracker"
    pub fn from_env() -> StoreResult<Self> {
        let uri = std::env::var("MONGODB_URI").map_err(|_| {
            StoreError::ConfigError("MONGODB_URI environment variable not set".to_string())
        })?;

        let database =
            std::env::var("MONGODB_DB").unwrap_or_else(|_| "jobtracker".to_string());

        Ok(Self {
            uri,
            database,
            app_name: "jobtrack-server".to_string(),
        })
    }
}

/// Database store for the Job Tracker API.
///
/// Cheap to clone; the underlying client manages its own connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Connect to the database with the given configuration.
    ///
    /// Issues a `ping` command so that an unreachable server or a bad
    /// connection string fails here instead of on the first request.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        tracing::info!(database = %config.database, "Connecting to MongoDB...");

        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(options)?;
        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database = %config.database, "Connected to MongoDB");

        Ok(Self { db })
    }

    /// Create a store from an existing database handle.
    ///
    /// The handle is not pinged; used by tests that never touch the server.
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<UserDoc> {
        self.db.collection(USERS_COLLECTION)
    }

    fn jobs(&self) -> Collection<JobDoc> {
        self.db.collection(JOBS_COLLECTION)
    }

    // ==================== User Operations ====================

    /// Insert a new user account.
    ///
    /// Returns `DuplicateUser` if the username is already taken. The check
    /// is a find-then-insert and there is no unique index on `username`,
    /// so two concurrent registrations of the same name can race past it.
    pub async fn create_user(&self, new_user: NewUser) -> StoreResult<UserDoc> {
        let existing = self
            .users()
            .find_one(doc! { "username": &new_user.username })
            .await?;
        if existing.is_some() {
            return Err(StoreError::DuplicateUser(new_user.username));
        }

        let user = new_user.into_doc();
        self.users().insert_one(&user).await?;

        tracing::debug!(user_id = %user.id, username = %user.username, "Inserted user");
        Ok(user)
    }

    /// Look up a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<UserDoc>> {
        let user = self.users().find_one(doc! { "username": username }).await?;
        Ok(user)
    }

    /// Look up a user by id, failing if absent.
    pub async fn get_user_by_id(&self, user_id: UserId) -> StoreResult<UserDoc> {
        self.users()
            .find_one(doc! { "_id": bson::Uuid::from_uuid_1(user_id.0) })
            .await?
            .ok_or(StoreError::UserNotFound(user_id))
    }

    // ==================== Job Operations ====================

    /// Insert a new job record.
    pub async fn insert_job(&self, job: &Job) -> StoreResult<()> {
        self.jobs().insert_one(JobDoc::from(job)).await?;
        tracing::debug!(job_id = %job.id, user_id = %job.user_id, "Inserted job");
        Ok(())
    }

    /// Fetch a job owned by the given user.
    pub async fn get_job(&self, job_id: JobId, user_id: UserId) -> StoreResult<Job> {
        let doc = self
            .jobs()
            .find_one(doc! {
                "_id": bson::Uuid::from_uuid_1(job_id.0),
                "user_id": bson::Uuid::from_uuid_1(user_id.0),
            })
            .await?
            .ok_or(StoreError::JobNotFound(job_id))?;

        doc.try_into()
    }

    /// List all jobs owned by the given user, most recent first.
    pub async fn list_jobs(&self, user_id: UserId) -> StoreResult<Vec<Job>> {
        let mut cursor = self
            .jobs()
            .find(doc! { "user_id": bson::Uuid::from_uuid_1(user_id.0) })
            .sort(doc! { "created": -1 })
            .await?;

        let mut jobs = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            jobs.push(doc.try_into()?);
        }
        Ok(jobs)
    }

    /// Apply a partial update to a job owned by the given user.
    ///
    /// Returns the updated job. The `updated` timestamp is always refreshed.
    pub async fn update_job(
        &self,
        job_id: JobId,
        user_id: UserId,
        update: JobUpdate,
    ) -> StoreResult<Job> {
        let mut set = doc! { "updated": bson::DateTime::now() };
        let mut unset = bson::Document::new();

        if let Some(company) = update.company {
            set.insert("company", company);
        }
        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(status) = update.status {
            set.insert("status", status.as_str());
        }
        match update.notes {
            Some(Some(notes)) => {
                set.insert("notes", notes);
            }
            Some(None) => {
                unset.insert("notes", "");
            }
            None => {}
        }

        let mut change = doc! { "$set": set };
        if !unset.is_empty() {
            change.insert("$unset", unset);
        }

        let doc = self
            .jobs()
            .find_one_and_update(
                doc! {
                    "_id": bson::Uuid::from_uuid_1(job_id.0),
                    "user_id": bson::Uuid::from_uuid_1(user_id.0),
                },
                change,
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(StoreError::JobNotFound(job_id))?;

        tracing::debug!(job_id = %job_id, user_id = %user_id, "Updated job");
        doc.try_into()
    }

    /// Delete a job owned by the given user.
    pub async fn delete_job(&self, job_id: JobId, user_id: UserId) -> StoreResult<()> {
        let result = self
            .jobs()
            .delete_one(doc! {
                "_id": bson::Uuid::from_uuid_1(job_id.0),
                "user_id": bson::Uuid::from_uuid_1(user_id.0),
            })
            .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::JobNotFound(job_id));
        }

        tracing::debug!(job_id = %job_id, user_id = %user_id, "Deleted job");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "jobtracker");
    }

    #[test]
    fn test_config_from_env() {
        // Single test owns these variables so parallel tests cannot race.
        // SAFETY: no other test in this binary touches MONGODB_URI/MONGODB_DB.
        unsafe { std::env::remove_var("MONGODB_URI") };
        unsafe { std::env::remove_var("MONGODB_DB") };

        let result = StoreConfig::from_env();
        assert!(matches!(result, Err(StoreError::ConfigError(_))));

        // SAFETY: see above.
        unsafe { std::env::set_var("MONGODB_URI", "mongodb://db.example:27017") };

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.uri, "mongodb://db.example:27017");
        assert_eq!(config.database, "jobtracker");

        // SAFETY: see above.
        unsafe { std::env::remove_var("MONGODB_URI") };
    }
}
