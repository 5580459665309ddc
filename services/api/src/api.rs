use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;

use shared::stats::compute_stats;
use shared::validate::validate_payload;
use shared::{MeetingRecord, ResilientStore, SearchFilter, ValidationError};

use crate::middleware;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<ResilientStore>,
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook/meetings", post(receive_webhook))
        .route("/api/meetings", get(list_meetings))
        .route("/api/meetings/search", get(search_meetings))
        .route("/api/meetings/statistics", get(statistics))
        .route("/api/meetings/:id", get(get_meeting))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::trace_layer())
                .layer(middleware::cors_layer()),
        )
        .with_state(state)
}

/// Client-caused failures map to 400 with the offending webhook field named;
/// a lookup miss is 404, not an error. Store failures never reach this type
/// on the query surface because the resilient store absorbs them.
pub enum ApiError {
    BadField(&'static str),
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadField(field) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": field }))).into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadField(err.field())
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "pauta-api"
    }))
}

async fn receive_webhook(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<MeetingRecord>), ApiError> {
    let record = validate_payload(&payload)?;

    info!(
        "Webhook accepted meeting {} organized by {}",
        record.id, record.organizer
    );

    let stored = state.store.insert(record).await;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub order: Option<String>,
}

async fn list_meetings(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<MeetingRecord>> {
    let descending = params.order.as_deref() != Some("asc");
    Json(state.store.list(descending).await)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub organizer: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl SearchParams {
    fn into_filter(self) -> Result<SearchFilter, ApiError> {
        Ok(SearchFilter {
            query: non_empty(self.query),
            organizer: non_empty(self.organizer),
            date_from: parse_date(self.date_from, "dateFrom")?,
            date_to: parse_date(self.date_to, "dateTo")?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_date(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ApiError> {
    match non_empty(value) {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadField(field)),
        None => Ok(None),
    }
}

async fn search_meetings(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<MeetingRecord>>, ApiError> {
    let filter = params.into_filter()?;
    Ok(Json(state.store.search(&filter).await))
}

async fn statistics(State(state): State<ApiState>) -> Json<shared::MeetingStats> {
    let records = state.store.list(true).await;
    Json(compute_stats(&records, Utc::now().date_naive()))
}

async fn get_meeting(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MeetingRecord>, ApiError> {
    state
        .store
        .get_by_id(&id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}
