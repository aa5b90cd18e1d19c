use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::marketplace::applications::router::application_router;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn apply_request(employee: &str, job: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/applications")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            json!({ "employee_id": employee, "job_id": job }).to_string(),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn apply_route_returns_created_with_wire_labels() {
    let (service, _, _) = harbor_world();
    let router = application_router(Arc::new(service));

    let response = router
        .oneshot(apply_request("emp-1", "job-1"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["employer_status"], "Applied");
    assert_eq!(body["employee_status"], Value::Null);
    assert_eq!(body["effective_status"], "Applied");
    assert_eq!(body["company_name"], "Harbor Cafe");
}

#[tokio::test]
async fn duplicate_apply_over_http_is_a_conflict() {
    let (service, _, _) = harbor_world();
    let router = application_router(Arc::new(service));

    let first = router
        .clone()
        .oneshot(apply_request("emp-1", "job-1"))
        .await
        .expect("router responds");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(apply_request("emp-1", "job-1"))
        .await
        .expect("router responds");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn employer_status_route_rejects_non_owners() {
    let (service, _, _) = harbor_world();
    let service = Arc::new(service);
    let router = application_router(service.clone());

    let created = router
        .clone()
        .oneshot(apply_request("emp-1", "job-1"))
        .await
        .expect("router responds");
    let body = read_json_body(created).await;
    let application_id = body["id"].as_str().expect("id present").to_string();

    let request = axum::http::Request::put(format!(
        "/api/v1/applications/{application_id}/employer-status"
    ))
    .header(axum::http::header::CONTENT_TYPE, "application/json")
    .body(axum::body::Body::from(
        json!({ "employer_id": "org-2", "status": "Hired" }).to_string(),
    ))
    .expect("request builds");

    let response = router.oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn withdraw_route_reports_not_found_for_missing_records() {
    let (service, _, _) = harbor_world();
    let router = application_router(Arc::new(service));

    let request = axum::http::Request::delete("/api/v1/employees/emp-1/applications/app-404")
        .body(axum::body::Body::empty())
        .expect("request builds");

    let response = router.oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_job_routes_cover_save_conflict_and_unsave() {
    let (service, _, _) = harbor_world();
    let router = application_router(Arc::new(service));

    let save = |employee: &str, job: &str| {
        axum::http::Request::post("/api/v1/saved-jobs")
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                json!({ "employee_id": employee, "job_id": job }).to_string(),
            ))
            .expect("request builds")
    };

    let created = router
        .clone()
        .oneshot(save("emp-1", "job-1"))
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = router
        .clone()
        .oneshot(save("emp-1", "job-1"))
        .await
        .expect("router responds");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let unsave = axum::http::Request::delete("/api/v1/saved-jobs/emp-1/job-1")
        .body(axum::body::Body::empty())
        .expect("request builds");
    let removed = router.oneshot(unsave).await.expect("router responds");
    assert_eq!(removed.status(), StatusCode::OK);
}
