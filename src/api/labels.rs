//! Labels Routes
//!
//! Routes:
//! - GET /labels - List all labels
//! - POST /labels - Create a label

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use super::decode;
use crate::models::Label;
use crate::{AppState, Result};

/// Build label routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_labels).post(create_label))
}

/// Request to create a label.
#[derive(Debug, Deserialize)]
pub struct CreateLabelRequest {
    /// Color code, e.g. `#fff`. Stored as given.
    pub hex: String,
    #[serde(default)]
    pub description: String,
}

/// POST /labels
async fn create_label(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLabelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Label>)> {
    let req = decode(payload)?;

    let label = state.labels.add_label(&req.hex, &req.description).await?;

    Ok((StatusCode::CREATED, Json(label)))
}

/// GET /labels
async fn list_labels(State(state): State<AppState>) -> Result<Json<Vec<Label>>> {
    let labels = state
        .labels
        .get_all_labels()
        .await
        .inspect_err(|e| error!(error = %e, "Unable to fetch all labels"))?;

    Ok(Json(labels))
}
