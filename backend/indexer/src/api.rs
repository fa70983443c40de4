//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SubjectEventsResponse {
    pub subject_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /projects/:id/events`
///
/// Returns all indexed lifecycle events for the given project.
pub async fn get_project_events(
    State(state): State<Arc<ApiState>>,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    let project_id = match parse_subject_id(&project_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match db::get_events_for_project(&state.pool, &project_id).await {
        Ok(events) => subject_response(project_id, events),
        Err(e) => error_response(e.to_string()),
    }
}

/// `GET /listings/:id/events`
///
/// Returns all indexed marketplace events for the given listing.
pub async fn get_listing_events(
    State(state): State<Arc<ApiState>>,
    Path(listing_id): Path<String>,
) -> impl IntoResponse {
    let listing_id = match parse_subject_id(&listing_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match db::get_events_for_listing(&state.pool, &listing_id).await {
        Ok(events) => subject_response(listing_id, events),
        Err(e) => error_response(e.to_string()),
    }
}

/// `GET /events`
///
/// Returns all indexed events across projects and listings.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(AllEventsResponse { count, events })),
            )
                .into_response()
        }
        Err(e) => error_response(e.to_string()),
    }
}

/// Project and listing ids are contract-assigned `u64` counters; anything
/// else gets a 400 before it reaches the database.
fn parse_subject_id(raw: &str) -> std::result::Result<String, axum::response::Response> {
    match raw.parse::<u64>() {
        Ok(id) => Ok(id.to_string()),
        Err(_) => {
            let err = IndexerError::InvalidSubjectId(raw.to_string());
            Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!(ErrorResponse {
                    error: err.to_string(),
                })),
            )
                .into_response())
        }
    }
}

fn subject_response(subject_id: String, events: Vec<EventRecord>) -> axum::response::Response {
    let count = events.len();
    (
        StatusCode::OK,
        Json(serde_json::json!(SubjectEventsResponse {
            subject_id,
            count,
            events,
        })),
    )
        .into_response()
}

fn error_response(error: String) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!(ErrorResponse { error })),
    )
        .into_response()
}
