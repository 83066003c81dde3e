#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rab_scheduler::http_api::{self, PreviewResponse, ScheduleResponse};
use rab_scheduler::{Project, ProjectMetadata, WorkItem};
use serde_json::json;
use tower::util::ServiceExt;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_router() -> axum::Router {
    let project = Project::new_with_metadata(ProjectMetadata {
        name: "HTTP".into(),
        description: String::new(),
        start_date: d(2025, 1, 1),
        end_date: d(2025, 1, 15),
    });
    let state = http_api::AppState::new(project);
    http_api::router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn item_lifecycle_via_http_api() {
    let app = new_router();
    let item = WorkItem::new("s1", "Cor Beton Sloof", "Struktur", 6.0, "m3");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/items", serde_json::to_value(&item).unwrap()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/items", serde_json::to_value(&item).unwrap()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.clone().oneshot(empty_request("GET", "/items/s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: WorkItem = read_json(response).await;
    assert_eq!(fetched, item);

    let response = app.clone().oneshot(empty_request("DELETE", "/items/s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(empty_request("GET", "/items/s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_mismatched_id() {
    let app = new_router();
    let item = WorkItem::new("a", "Plester", "Dinding", 10.0, "m2");
    let response = app
        .oneshot(json_request("PUT", "/items/b", serde_json::to_value(&item).unwrap()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_metadata_is_rejected() {
    let app = new_router();
    let response = app
        .oneshot(json_request(
            "PUT",
            "/metadata",
            json!({"name": "Bad", "startDate": "2025-02-01", "endDate": "2025-01-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn schedule_and_preview_use_project_state() {
    let app = new_router();
    for item in [
        WorkItem::new("f1", "Pekerjaan Khusus", "Finishing", 5.0, "ls"),
        WorkItem::new("s1", "Pekerjaan Khusus", "Struktur", 10.0, "ls"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/items", serde_json::to_value(&item).unwrap()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(empty_request("GET", "/preview")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let preview: PreviewResponse = read_json(response).await;
    assert_eq!(preview.lines[1], "Total workload: 15 team-days");

    let response = app
        .oneshot(json_request("POST", "/schedule", json!({"keepExisting": false})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let scheduled: ScheduleResponse = read_json(response).await;
    assert_eq!(scheduled.summary.category_count, 2);
    assert_eq!(scheduled.items[0].id, "s1");
    assert_eq!(scheduled.items[0].end_date, Some(d(2025, 1, 10)));
    assert_eq!(scheduled.items[1].end_date, Some(d(2025, 1, 15)));
}

#[tokio::test]
async fn stateless_estimate_returns_scheduled_items() {
    let app = new_router();
    let response = app
        .oneshot(json_request(
            "POST",
            "/estimate",
            json!({
                "startDate": "2025-03-01",
                "endDate": "2025-03-21",
                "keepExisting": true,
                "items": [
                    {"id": "a", "name": "Galian Tanah", "category": "Tanah", "volume": 8, "unit": "m3"},
                    {"id": "b", "name": "Urugan", "category": "Tanah", "volume": 6,
                     "startDate": "2025-02-01", "endDate": "2025-02-03"}
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<WorkItem> = read_json(response).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "b");
    assert_eq!(items[0].start_date, Some(d(2025, 2, 1)));
    assert_eq!(items[1].start_date, Some(d(2025, 3, 1)));
    assert_eq!(items[1].end_date, Some(d(2025, 3, 21)));
}
