//! Label and thought-label association models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ThoughtId;

/// A reusable categorical tag with a color code and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Label {
    /// Assigned by the store.
    pub id: i64,
    pub hex: String,
    pub description: String,
}

/// A (thought, label) link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtLabel {
    pub thought_id: ThoughtId,
    pub label_id: i64,
}
