//! Label database queries.

use crate::models::Label;
use crate::{Error, Result};

use super::{execute_schemas, DbPool};

/// Storage for the `label` table.
#[derive(Clone)]
pub struct LabelStore {
    pool: DbPool,
}

impl LabelStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// DDL owned by this store.
    ///
    /// AUTOINCREMENT keeps ids strictly increasing, never reusing a value.
    pub fn schemas() -> &'static [&'static str] {
        &[r#"
        CREATE TABLE IF NOT EXISTS label (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hex TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#]
    }

    pub async fn initialize(&self) -> Result<()> {
        execute_schemas(&self.pool, Self::schemas()).await
    }

    /// Create a label. The id is assigned by the store.
    pub async fn add_label(&self, hex: &str, description: &str) -> Result<Label> {
        sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO label (hex, description)
            VALUES (?, ?)
            RETURNING id, hex, description
            "#,
        )
        .bind(hex)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)
    }

    /// List all labels in creation order.
    pub async fn get_all_labels(&self) -> Result<Vec<Label>> {
        sqlx::query_as::<_, Label>("SELECT id, hex, description FROM label ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }
}
