//! Thoughts Routes
//!
//! Routes:
//! - GET /thoughts - List all thoughts
//! - POST /thoughts - Create a thought
//! - GET /thoughts/:id - Get one thought
//! - PUT /thoughts/:id - Replace title and content

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::decode;
use crate::models::{Thought, ThoughtId};
use crate::{AppState, Error, Result};

/// Build thought routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_thoughts).post(create_thought))
        .route("/:id", get(get_thought).put(update_thought))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request to create a thought.
#[derive(Debug, Deserialize)]
pub struct CreateThoughtRequest {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub content: String,
}

/// Request to update a thought. Both fields are replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateThoughtRequest {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub content: String,
}

/// Parse the `:id` path segment.
fn parse_id(raw: &str) -> Result<ThoughtId> {
    ThoughtId::parse(raw).inspect_err(|e| warn!(id = %raw, error = %e, "Invalid url param"))
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a thought.
///
/// POST /thoughts
#[axum::debug_handler]
async fn create_thought(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateThoughtRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Thought>)> {
    info!("Adding a new thought");
    let req = decode(payload)?;

    let thought = state.thoughts.add_thought(&req.title, &req.content).await?;

    Ok((StatusCode::CREATED, Json(thought)))
}

/// List all thoughts.
///
/// GET /thoughts
async fn list_thoughts(State(state): State<AppState>) -> Result<Json<Vec<Thought>>> {
    let thoughts = state.thoughts.get_all_thoughts().await?;
    Ok(Json(thoughts))
}

/// Get a thought.
///
/// GET /thoughts/:id
async fn get_thought(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Thought>> {
    let id = parse_id(&id)?;

    let thought = state.thoughts.get_thought(&id).await?;
    Ok(Json(thought))
}

/// Update a thought's title and content.
///
/// PUT /thoughts/:id
///
/// Returns 204 on success and 404 when no thought has this id.
#[axum::debug_handler]
async fn update_thought(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateThoughtRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let req = decode(payload)?;

    match state
        .thoughts
        .update_thought(&id, &req.title, &req.content)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e @ Error::NoRowUpdated(_)) => {
            warn!(%id, "Update matched no thought");
            Err(e)
        }
        Err(e) => Err(e),
    }
}
