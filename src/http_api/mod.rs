use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    Project, ProjectMetadata, ProjectWindow, ScheduleOptions, ScheduleSummary, WorkItem,
    generate_schedule, item_validation,
};

#[derive(Clone)]
pub struct AppState {
    project: Arc<RwLock<Project>>,
}

impl AppState {
    pub fn new(project: Project) -> Self {
        Self {
            project: Arc::new(RwLock::new(project)),
        }
    }

    pub fn with_shared(project: Arc<RwLock<Project>>) -> Self {
        Self { project }
    }

    fn project(&self) -> Arc<RwLock<Project>> {
        self.project.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<item_validation::ItemValidationError> for ApiError {
    fn from(value: item_validation::ItemValidationError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, "conflict", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub summary: ScheduleSummary,
    pub items: Vec<WorkItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub lines: Vec<String>,
}

/// Stateless scheduling request: a project window plus its items.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub items: Vec<WorkItem>,
    #[serde(default)]
    pub keep_existing: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metadata", get(get_metadata).put(update_metadata))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/schedule", post(run_schedule))
        .route("/preview", get(preview))
        .route("/estimate", post(estimate))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, project: Project) -> std::io::Result<()> {
    let state = AppState::new(project);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_metadata(State(state): State<AppState>) -> Json<ProjectMetadata> {
    let project = state.project();
    let metadata = project.read().metadata().clone();
    Json(metadata)
}

async fn update_metadata(
    State(state): State<AppState>,
    Json(metadata): Json<ProjectMetadata>,
) -> Result<Json<ProjectMetadata>, ApiError> {
    let project = state.project();
    let mut guard = project.write();
    guard
        .set_metadata(metadata)
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    Ok(Json(guard.metadata().clone()))
}

async fn list_items(State(state): State<AppState>) -> Json<Vec<WorkItem>> {
    let project = state.project();
    let items = project.read().items().to_vec();
    Json(items)
}

async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<WorkItem>, ApiError> {
    let project = state.project();
    let found = project.read().find_item(&item_id).cloned();
    found
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("item {item_id} not found")))
}

async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<WorkItem>,
) -> Result<(StatusCode, Json<WorkItem>), ApiError> {
    let project = state.project();
    let mut guard = project.write();
    if guard.find_item(&item.id).is_some() {
        return Err(ApiError::Conflict(format!("item {} already exists", item.id)));
    }
    let id = item.id.clone();
    guard.upsert_item(item)?;
    let created = guard
        .find_item(&id)
        .cloned()
        .ok_or_else(|| ApiError::internal("item not found after creation"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(item): Json<WorkItem>,
) -> Result<Json<WorkItem>, ApiError> {
    if item.id != item_id {
        return Err(ApiError::invalid(
            "item id in payload does not match path parameter",
        ));
    }
    let project = state.project();
    let mut guard = project.write();
    if guard.find_item(&item_id).is_none() {
        return Err(ApiError::not_found(format!("item {item_id} not found")));
    }
    guard.upsert_item(item)?;
    let updated = guard
        .find_item(&item_id)
        .cloned()
        .ok_or_else(|| ApiError::internal("item not found after update"))?;
    Ok(Json(updated))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let project = state.project();
    let removed = project.write().delete_item(&item_id);
    if !removed {
        return Err(ApiError::not_found(format!("item {item_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn run_schedule(
    State(state): State<AppState>,
    options: Option<Json<ScheduleOptions>>,
) -> Json<ScheduleResponse> {
    let options = options.map(|Json(options)| options).unwrap_or_default();
    let project = state.project();
    let mut guard = project.write();
    let summary = guard.schedule(options);
    Json(ScheduleResponse {
        summary,
        items: guard.items().to_vec(),
    })
}

async fn preview(State(state): State<AppState>) -> Json<PreviewResponse> {
    let project = state.project();
    let lines = project.read().preview().lines();
    Json(PreviewResponse { lines })
}

async fn estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Json<Vec<WorkItem>> {
    let window = ProjectWindow::new(request.start_date, request.end_date);
    let options = ScheduleOptions {
        keep_existing: request.keep_existing,
    };
    let config = state.project().read().config().clone();
    Json(generate_schedule(&window, &request.items, &config, options))
}
