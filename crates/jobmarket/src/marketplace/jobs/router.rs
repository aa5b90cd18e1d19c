use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::parties::{EmployerDirectory, EmployerId};
use crate::marketplace::reviews::repository::ReviewRepository;

use super::domain::{JobDraft, JobId, JobStatus};
use super::repository::JobRepository;
use super::filter::{JobSearchFilter, Pagination};
use super::service::{JobBoardService, JobServiceError};

/// Router builder exposing posting, status toggling, search, and salary
/// statistics.
pub fn job_router<J, E, V>(service: Arc<JobBoardService<J, E, V>>) -> Router
where
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    V: ReviewRepository + 'static,
{
    Router::new()
        .route("/api/v1/jobs", post(post_job_handler::<J, E, V>))
        .route(
            "/api/v1/jobs/:job_id/status",
            put(update_status_handler::<J, E, V>),
        )
        .route("/api/v1/jobs/search", post(search_handler::<J, E, V>))
        .route(
            "/api/v1/jobs/salary-statistics",
            post(salary_statistics_handler::<J, E, V>),
        )
        .with_state(service)
}

/// Search body: the criteria bag plus page selectors, all optional.
#[derive(Debug, Default, Deserialize)]
pub struct JobSearchRequest {
    #[serde(flatten)]
    pub filter: JobSearchFilter,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct JobStatusUpdateRequest {
    pub employer_id: EmployerId,
    pub status: JobStatus,
}

pub(crate) async fn post_job_handler<J, E, V>(
    State(service): State<Arc<JobBoardService<J, E, V>>>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    V: ReviewRepository + 'static,
{
    match service.post_job(draft, Utc::now()) {
        Ok(job) => (StatusCode::CREATED, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_status_handler<J, E, V>(
    State(service): State<Arc<JobBoardService<J, E, V>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<JobStatusUpdateRequest>,
) -> Response
where
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    V: ReviewRepository + 'static,
{
    let id = JobId(job_id);
    match service.update_status(&request.employer_id, &id, request.status, Utc::now()) {
        Ok(()) => {
            let payload = json!({ "message": "status updated" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn search_handler<J, E, V>(
    State(service): State<Arc<JobBoardService<J, E, V>>>,
    axum::Json(request): axum::Json<JobSearchRequest>,
) -> Response
where
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    V: ReviewRepository + 'static,
{
    match service.search(&request.filter, request.pagination, Utc::now()) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn salary_statistics_handler<J, E, V>(
    State(service): State<Arc<JobBoardService<J, E, V>>>,
    axum::Json(request): axum::Json<JobSearchRequest>,
) -> Response
where
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    V: ReviewRepository + 'static,
{
    match service.salary_statistics(&request.filter, request.pagination, Utc::now()) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: JobServiceError) -> Response {
    let status = match &error {
        JobServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        JobServiceError::EmployerNotFound | JobServiceError::JobNotFound => StatusCode::NOT_FOUND,
        JobServiceError::NotJobOwner => StatusCode::FORBIDDEN,
        JobServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
