use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::parties::{EmployerDirectory, EmployerId};

use super::domain::{ReviewDraft, ReviewId};
use super::repository::ReviewRepository;
use super::service::{ReviewService, ReviewServiceError};

/// Router builder exposing review submission and the employer reputation
/// views.
pub fn review_router<V, E, J>(service: Arc<ReviewService<V, E, J>>) -> Router
where
    V: ReviewRepository + 'static,
    E: EmployerDirectory + 'static,
    J: JobRepository + 'static,
{
    Router::new()
        .route("/api/v1/reviews", post(add_review_handler::<V, E, J>))
        .route(
            "/api/v1/reviews/:review_id",
            delete(delete_review_handler::<V, E, J>),
        )
        .route("/api/v1/employers", get(directory_handler::<V, E, J>))
        .route(
            "/api/v1/employers/:employer_id/reviews",
            get(employer_detail_handler::<V, E, J>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DirectoryQuery {
    #[serde(default)]
    company_name: Option<String>,
}

pub(crate) async fn add_review_handler<V, E, J>(
    State(service): State<Arc<ReviewService<V, E, J>>>,
    axum::Json(draft): axum::Json<ReviewDraft>,
) -> Response
where
    V: ReviewRepository + 'static,
    E: EmployerDirectory + 'static,
    J: JobRepository + 'static,
{
    match service.add_review(draft, Utc::now()) {
        Ok(review) => (StatusCode::CREATED, axum::Json(review)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_review_handler<V, E, J>(
    State(service): State<Arc<ReviewService<V, E, J>>>,
    Path(review_id): Path<String>,
) -> Response
where
    V: ReviewRepository + 'static,
    E: EmployerDirectory + 'static,
    J: JobRepository + 'static,
{
    let id = ReviewId(review_id);
    match service.delete_review(&id) {
        Ok(()) => {
            let payload = json!({ "message": "review deleted" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn directory_handler<V, E, J>(
    State(service): State<Arc<ReviewService<V, E, J>>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    V: ReviewRepository + 'static,
    E: EmployerDirectory + 'static,
    J: JobRepository + 'static,
{
    match service.directory(query.company_name.as_deref()) {
        Ok(listings) => {
            let payload = json!({ "employers": listings });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employer_detail_handler<V, E, J>(
    State(service): State<Arc<ReviewService<V, E, J>>>,
    Path(employer_id): Path<String>,
) -> Response
where
    V: ReviewRepository + 'static,
    E: EmployerDirectory + 'static,
    J: JobRepository + 'static,
{
    let id = EmployerId(employer_id);
    match service.employer_detail(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ReviewServiceError) -> Response {
    let status = match &error {
        ReviewServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::EmployerNotFound | ReviewServiceError::ReviewNotFound => {
            StatusCode::NOT_FOUND
        }
        ReviewServiceError::DuplicateReview => StatusCode::CONFLICT,
        ReviewServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
