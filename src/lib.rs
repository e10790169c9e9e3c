//! scatter-brain - personal thoughts backend
//!
//! Stores short notes ("thoughts") and categorical labels in SQLite and
//! serves them over a small JSON API.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
