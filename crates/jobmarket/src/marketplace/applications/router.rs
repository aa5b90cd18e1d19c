use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::parties::{EmployeeId, EmployerDirectory, EmployerId};

use super::domain::{ApplicationId, ApplicationStatus, AppliedJob};
use super::repository::{ApplicationRepository, NotificationPublisher, SavedJobRepository};
use super::service::{ApplicationService, ApplicationServiceError};

/// Router builder exposing apply, the two status tracks, withdrawal,
/// bookmarks, and the employer roll-ups.
pub fn application_router<A, S, J, E, N>(
    service: Arc<ApplicationService<A, S, J, E, N>>,
) -> Router
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(apply_handler::<A, S, J, E, N>))
        .route(
            "/api/v1/applications/:application_id/employee-status",
            put(employee_status_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/applications/:application_id/employer-status",
            put(employer_status_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/employees/:employee_id/applications/:application_id",
            delete(withdraw_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/employees/:employee_id/applications",
            get(applications_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/jobs/:job_id/applicants",
            get(applicants_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/employers/:employer_id/application-counts",
            get(status_counts_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/saved-jobs",
            post(save_job_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/saved-jobs/:employee_id/:job_id",
            delete(unsave_job_handler::<A, S, J, E, N>),
        )
        .route(
            "/api/v1/employees/:employee_id/saved-jobs",
            get(saved_jobs_handler::<A, S, J, E, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub employee_id: EmployeeId,
    pub job_id: JobId,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeStatusUpdateRequest {
    pub employee_id: EmployeeId,
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct EmployerStatusUpdateRequest {
    pub employer_id: EmployerId,
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct SaveJobRequest {
    pub employee_id: EmployeeId,
    pub job_id: JobId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicantQuery {
    employer_id: EmployerId,
}

/// Application record plus the derived reconciliation of its two tracks.
#[derive(Debug, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: AppliedJob,
    pub effective_status: ApplicationStatus,
}

impl From<AppliedJob> for ApplicationView {
    fn from(application: AppliedJob) -> Self {
        let effective_status = application.effective_status();
        Self {
            application,
            effective_status,
        }
    }
}

pub(crate) async fn apply_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    axum::Json(request): axum::Json<ApplyRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    match service.apply(&request.employee_id, &request.job_id, Utc::now()) {
        Ok(application) => {
            let view = ApplicationView::from(application);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_status_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<EmployeeStatusUpdateRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_employee_status(&request.employee_id, &id, request.status) {
        Ok(application) => {
            let view = ApplicationView::from(application);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employer_status_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<EmployerStatusUpdateRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_employer_status(&request.employer_id, &id, request.status) {
        Ok(application) => {
            let view = ApplicationView::from(application);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn withdraw_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path((employee_id, application_id)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let employee = EmployeeId(employee_id);
    let id = ApplicationId(application_id);
    match service.withdraw(&employee, &id) {
        Ok(()) => {
            let payload = json!({ "message": "application withdrawn" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applications_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let employee = EmployeeId(employee_id);
    match service.applications_for(&employee) {
        Ok(applications) => {
            let views: Vec<ApplicationView> =
                applications.into_iter().map(ApplicationView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applicants_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path(job_id): Path<String>,
    Query(query): Query<ApplicantQuery>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let id = JobId(job_id);
    match service.applicants_for_job(&query.employer_id, &id) {
        Ok(applications) => {
            let views: Vec<ApplicationView> =
                applications.into_iter().map(ApplicationView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_counts_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path(employer_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let employer = EmployerId(employer_id);
    match service.status_counts_for_employer(&employer) {
        Ok(counts) => {
            let payload = json!({
                "counts": counts,
                "hired_count": counts.hired,
                "total_applications_count": counts.total(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_job_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    axum::Json(request): axum::Json<SaveJobRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    match service.save_job(&request.employee_id, &request.job_id, Utc::now()) {
        Ok(saved) => (StatusCode::CREATED, axum::Json(saved)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unsave_job_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path((employee_id, job_id)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let employee = EmployeeId(employee_id);
    let id = JobId(job_id);
    match service.unsave_job(&employee, &id) {
        Ok(()) => {
            let payload = json!({ "message": "job removed from saved jobs" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn saved_jobs_handler<A, S, J, E, N>(
    State(service): State<Arc<ApplicationService<A, S, J, E, N>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let employee = EmployeeId(employee_id);
    match service.saved_jobs_for(&employee) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::JobNotFound
        | ApplicationServiceError::EmployerNotFound
        | ApplicationServiceError::ApplicationNotFound
        | ApplicationServiceError::SavedJobNotFound => StatusCode::NOT_FOUND,
        ApplicationServiceError::AlreadyApplied | ApplicationServiceError::AlreadySaved => {
            StatusCode::CONFLICT
        }
        ApplicationServiceError::NotApplicant | ApplicationServiceError::NotJobOwner => {
            StatusCode::FORBIDDEN
        }
        ApplicationServiceError::JobNotOpen => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
