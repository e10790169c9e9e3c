//! Status Routes
//!
//! Routes:
//! - GET /ping - Fixed availability payload

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Name reported by the ping endpoint.
pub const SERVICE_NAME: &str = "scatter-brain";

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// Ping response. Keys go out capitalized: `{"Status":..,"Service":..}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /ping
async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "pong",
        service: SERVICE_NAME,
    })
}
