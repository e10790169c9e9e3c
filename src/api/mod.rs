//! API Routes for scatter-brain
//!
//! This module combines all API routes into a single router.
//! Every handler decodes, calls exactly one store operation, and maps the
//! outcome to a status code; failures are mapped by [`crate::Error`].

mod labels;
pub mod status;
mod thought_labels;
mod thoughts;

use axum::{extract::rejection::JsonRejection, Json, Router};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::{AppState, Result};

/// Build the complete API router.
///
/// Route structure:
/// - /api/ping - Liveness check
/// - /api/thoughts/* - Thought CRUD
/// - /api/labels - Label creation and listing
/// - /api/thought-labels - Label associations
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(status::routes())
            .nest("/thoughts", thoughts::routes())
            .nest("/labels", labels::routes())
            .nest("/thought-labels", thought_labels::routes()),
    )
}

/// Unwrap a JSON body extracted as `Result<Json<T>, JsonRejection>`.
///
/// Any rejection (syntax, missing fields, wrong content type) becomes a 400.
fn decode<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Json decoding failed");
            Err(rejection.into())
        }
    }
}

/// Read a text field where `null` means empty. Pair with `#[serde(default)]`
/// so a missing field is empty too.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
