//! HTTP endpoint handlers. These are thin wrappers that forward to the lesson service
//! and map its results onto the JSON envelope and status codes.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument};

use crate::protocol::{ApiData, ApiMessage};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(ApiMessage::ok("INPACT API is running!"))
}

/// Lesson summaries sorted by numeric lesson id (slug breaks ties).
#[instrument(level = "info", skip(state))]
pub async fn http_list_lessons(State(state): State<Arc<AppState>>) -> Response {
  match state.lessons.get_all_algorithms().await {
    Ok(mut summaries) => {
      summaries.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.slug.cmp(&b.slug)));
      info!(target: "inpact_backend", count = summaries.len(), "HTTP lessons listed");
      Json(ApiData::ok(summaries)).into_response()
    }
    Err(e) => {
      error!(target: "inpact_backend", error = %e, "Listing lessons failed");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiMessage::error(e.to_string()))).into_response()
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_lesson(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
  match state.lessons.get_lesson_by_slug(&slug).await {
    Ok(Some(lesson)) => {
      let score = lesson.stored_quality().map(|q| q.score);
      info!(target: "inpact_backend", %slug, ?score, "HTTP lesson served");
      Json(ApiData::ok(lesson)).into_response()
    }
    Ok(None) => (StatusCode::NOT_FOUND, Json(ApiMessage::error("Lesson not found"))).into_response(),
    Err(e) => {
      error!(target: "inpact_backend", %slug, error = %e, "Lesson could not be loaded");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiMessage::error("Lesson could not be loaded"))).into_response()
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_standards(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(ApiData::ok(state.lessons.standards().clone()))
}
