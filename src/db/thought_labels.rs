//! Thought-label association queries.

use crate::models::{Label, ThoughtLabel, ThoughtWithLabels};
use crate::Result;
use sqlx::FromRow;

use super::thoughts::ThoughtRow;
use super::{execute_schemas, DbPool};

/// Joined association row: the thought columns plus the label columns.
#[derive(Debug, FromRow)]
struct ThoughtWithLabelRow {
    #[sqlx(flatten)]
    thought: ThoughtRow,
    label_id: i64,
    hex: String,
    description: String,
}

/// Storage for the `thought_with_labels` table.
#[derive(Clone)]
pub struct ThoughtLabelStore {
    pool: DbPool,
}

impl ThoughtLabelStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// DDL owned by this store. Must run after the thought and label tables
    /// exist.
    pub fn schemas() -> &'static [&'static str] {
        &[r#"
        CREATE TABLE IF NOT EXISTS thought_with_labels (
            thought_id TEXT NOT NULL REFERENCES thought(id),
            label_id INTEGER NOT NULL REFERENCES label(id),
            PRIMARY KEY (thought_id, label_id)
        )
        "#]
    }

    pub async fn initialize(&self) -> Result<()> {
        execute_schemas(&self.pool, Self::schemas()).await
    }

    /// Attach a label to an existing thought.
    ///
    /// No checks happen here. Unknown ids and duplicate pairs are rejected by
    /// the schema and surface as database errors.
    pub async fn add_label_to_thought(&self, link: ThoughtLabel) -> Result<ThoughtLabel> {
        sqlx::query("INSERT INTO thought_with_labels (thought_id, label_id) VALUES (?, ?)")
            .bind(link.thought_id.to_string())
            .bind(link.label_id)
            .execute(&self.pool)
            .await?;

        Ok(link)
    }

    /// Every association, as a thought paired with one label.
    pub async fn get_thoughts_with_labels(&self) -> Result<Vec<ThoughtWithLabels>> {
        let rows = sqlx::query_as::<_, ThoughtWithLabelRow>(
            r#"
            SELECT
                t.id,
                t.title,
                t.content,
                t.create_time,
                t.update_time,
                l.id AS label_id,
                l.hex,
                l.description
            FROM thought_with_labels tl
            INNER JOIN thought t ON t.id = tl.thought_id
            INNER JOIN label l ON l.id = tl.label_id
            ORDER BY t.create_time ASC, t.id ASC, l.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ThoughtWithLabels {
                    thought: row.thought.into_thought()?,
                    labels: Label {
                        id: row.label_id,
                        hex: row.hex,
                        description: row.description,
                    },
                })
            })
            .collect()
    }
}
