//! Job tracking routes: list, create, fetch, update, delete.
//!
//! Every route requires a Bearer token and is scoped to the authenticated
//! user. Mutations publish a notification to the user's real-time channel.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use jobtrack_core::{Job, JobId, JobStatus};
use jobtrack_store::JobUpdate;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::events::JobAction;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateJobRequest {
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: Option<JobStatus>,
    /// An empty string clears the notes; absent leaves them unchanged.
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub id: JobId,
    pub message: String,
}

impl From<UpdateJobRequest> for JobUpdate {
    fn from(request: UpdateJobRequest) -> Self {
        Self {
            company: request.company,
            title: request.title,
            status: request.status,
            notes: request.notes.map(|s| if s.is_empty() { None } else { Some(s) }),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/jobs - List the authenticated user's jobs, most recent first.
async fn list_jobs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ListJobsResponse>> {
    let jobs = state.store().list_jobs(user.user_id).await?;
    Ok(Json(ListJobsResponse { jobs }))
}

/// POST /api/jobs - Create a job record.
async fn create_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    if request.company.trim().is_empty() || request.title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Company and title must not be empty".to_string(),
        ));
    }

    let mut job = Job::new(user.user_id, request.company.trim(), request.title.trim());
    if let Some(status) = request.status {
        job.status = status;
    }
    job.notes = request.notes;

    state.store().insert_job(&job).await?;
    let _ = state
        .hub()
        .publish_job(user.user_id, &job, JobAction::Created)
        .await;

    tracing::info!(job_id = %job.id, user_id = %user.user_id, company = %job.company, "Job created");

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs/{id} - Fetch a single job.
async fn get_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<JobId>,
) -> ApiResult<Json<Job>> {
    let job = state.store().get_job(job_id, user.user_id).await?;
    Ok(Json(job))
}

/// PUT /api/jobs/{id} - Apply a partial update.
async fn update_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<JobId>,
    Json(request): Json<UpdateJobRequest>,
) -> ApiResult<Json<Job>> {
    let update = JobUpdate::from(request);
    if update.is_empty() {
        return Err(ApiError::BadRequest("Nothing to update".to_string()));
    }

    let job = state.store().update_job(job_id, user.user_id, update).await?;
    let _ = state
        .hub()
        .publish_job(user.user_id, &job, JobAction::Updated)
        .await;

    tracing::info!(job_id = %job.id, user_id = %user.user_id, status = %job.status, "Job updated");

    Ok(Json(job))
}

/// DELETE /api/jobs/{id} - Delete a job record.
async fn delete_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<JobId>,
) -> ApiResult<Json<DeleteJobResponse>> {
    // Fetch first so the notification can describe what was removed.
    let job = state.store().get_job(job_id, user.user_id).await?;
    state.store().delete_job(job_id, user.user_id).await?;
    let _ = state
        .hub()
        .publish_job(user.user_id, &job, JobAction::Deleted)
        .await;

    tracing::info!(job_id = %job_id, user_id = %user.user_id, "Job deleted");

    Ok(Json(DeleteJobResponse {
        id: job_id,
        message: "Job deleted".to_string(),
    }))
}

/// Build job routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route(
            "/api/jobs/{id}",
            get(get_job).put(update_job).delete(delete_job),
        )
}
