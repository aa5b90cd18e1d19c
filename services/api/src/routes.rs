use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use jobmarket::marketplace::applications::{application_router, ApplicationService};
use jobmarket::marketplace::jobs::{job_router, JobBoardService};
use jobmarket::marketplace::reviews::{review_router, ReviewService};

use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryEmployerDirectory, InMemoryJobRepository,
    InMemoryReviewRepository, InMemorySavedJobRepository, LoggingNotificationPublisher,
};

pub(crate) type Board =
    JobBoardService<InMemoryJobRepository, InMemoryEmployerDirectory, InMemoryReviewRepository>;

pub(crate) type Applications = ApplicationService<
    InMemoryApplicationRepository,
    InMemorySavedJobRepository,
    InMemoryJobRepository,
    InMemoryEmployerDirectory,
    LoggingNotificationPublisher,
>;

pub(crate) type Reviews =
    ReviewService<InMemoryReviewRepository, InMemoryEmployerDirectory, InMemoryJobRepository>;

pub(crate) fn with_marketplace_routes(
    board: Arc<Board>,
    applications: Arc<Applications>,
    reviews: Arc<Reviews>,
) -> axum::Router {
    job_router(board)
        .merge(application_router(applications))
        .merge(review_router(reviews))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
