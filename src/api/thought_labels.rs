//! Thought-Label Routes
//!
//! Routes:
//! - GET /thought-labels - List thoughts paired with their labels
//! - PUT /thought-labels - Attach a label to an existing thought
//! - POST /thought-labels - Create a thought with a label in one transaction

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::decode;
use crate::models::{ThoughtLabel, ThoughtWithLabels};
use crate::{AppState, Result};

/// Body returned when a thought is created together with its label.
pub const THOUGHT_CREATED: &str = "thought created";

/// Build thought-label routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_thoughts_with_labels)
            .put(add_label_to_thought)
            .post(create_thought_with_label),
    )
}

/// Request to create a thought with a label.
#[derive(Debug, Deserialize)]
pub struct CreateThoughtWithLabelRequest {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub content: String,
    pub label_id: i64,
}

/// PUT /thought-labels
///
/// Echoes the association back on success.
async fn add_label_to_thought(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ThoughtLabel>, JsonRejection>,
) -> Result<(StatusCode, Json<ThoughtLabel>)> {
    let link = decode(payload)?;

    let link = state.thought_labels.add_label_to_thought(link).await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// POST /thought-labels
async fn create_thought_with_label(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateThoughtWithLabelRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str)> {
    let req = decode(payload)?;

    let thought = state
        .thoughts
        .add_thought_with_label(&req.title, &req.content, req.label_id)
        .await?;
    info!(id = %thought.id, label_id = req.label_id, "Thought created with label");

    Ok((StatusCode::CREATED, THOUGHT_CREATED))
}

/// GET /thought-labels
async fn list_thoughts_with_labels(
    State(state): State<AppState>,
) -> Result<Json<Vec<ThoughtWithLabels>>> {
    let joined = state.thought_labels.get_thoughts_with_labels().await?;
    Ok(Json(joined))
}
