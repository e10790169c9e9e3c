//! Thought database queries.
//!
//! Thoughts are the primary entity. Besides plain CRUD this store owns the
//! one multi-statement write: creating a thought together with its first
//! label association in a single transaction.

use crate::models::{Thought, ThoughtId};
use crate::{Error, Result};
use sqlx::FromRow;
use tracing::debug;

use super::{execute_schemas, format_timestamp, now, parse_timestamp, DbPool, SQL_NOW};

// ============================================================================
// Types
// ============================================================================

/// Thought record as stored. Converted to [`Thought`] through the explicit
/// id and timestamp parsers.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ThoughtRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub create_time: String,
    pub update_time: String,
}

impl ThoughtRow {
    pub fn into_thought(self) -> Result<Thought> {
        Ok(Thought {
            id: ThoughtId::parse(&self.id)
                .map_err(|e| Error::Internal(format!("Corrupt thought row: {}", e)))?,
            title: self.title,
            content: self.content,
            create_time: parse_timestamp(&self.create_time)?,
            update_time: parse_timestamp(&self.update_time)?,
        })
    }
}

const INSERT_THOUGHT: &str = r#"
    INSERT INTO thought (id, title, content, create_time, update_time)
    VALUES (?, ?, ?, ?, ?)
"#;

/// Storage for the `thought` table.
#[derive(Clone)]
pub struct ThoughtStore {
    pool: DbPool,
}

impl ThoughtStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// DDL owned by this store.
    pub fn schemas() -> &'static [&'static str] {
        &[r#"
        CREATE TABLE IF NOT EXISTS thought (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            create_time TEXT NOT NULL,
            update_time TEXT NOT NULL
        )
        "#]
    }

    /// Create the table if it doesn't exist.
    pub async fn initialize(&self) -> Result<()> {
        execute_schemas(&self.pool, Self::schemas()).await
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Create a new thought with a fresh id and both timestamps set to now.
    pub async fn add_thought(&self, title: &str, content: &str) -> Result<Thought> {
        let thought = new_thought(title, content);
        let stamp = format_timestamp(&thought.create_time);

        sqlx::query(INSERT_THOUGHT)
            .bind(thought.id.to_string())
            .bind(&thought.title)
            .bind(&thought.content)
            .bind(&stamp)
            .bind(&stamp)
            .execute(&self.pool)
            .await?;

        debug!(id = %thought.id, "Thought created");
        Ok(thought)
    }

    /// Create a new thought and attach a label to it atomically.
    ///
    /// Either both rows are written or neither is. The label id is not
    /// checked here; the foreign key on `thought_with_labels` rejects
    /// unknown labels and the whole transaction is rolled back.
    pub async fn add_thought_with_label(
        &self,
        title: &str,
        content: &str,
        label_id: i64,
    ) -> Result<Thought> {
        let thought = new_thought(title, content);
        let id = thought.id.to_string();
        let stamp = format_timestamp(&thought.create_time);

        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;

        sqlx::query(INSERT_THOUGHT)
            .bind(&id)
            .bind(&thought.title)
            .bind(&thought.content)
            .bind(&stamp)
            .bind(&stamp)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO thought_with_labels (thought_id, label_id) VALUES (?, ?)")
            .bind(&id)
            .bind(label_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id = %thought.id, label_id, "Thought created with label");
        Ok(thought)
    }

    /// Replace title and content, stamping `update_time` from the database
    /// clock.
    ///
    /// The new `update_time` is never earlier than one millisecond after the
    /// previous one, so it advances even for writes within the same
    /// millisecond. Returns [`Error::NoRowUpdated`] when the id is unknown.
    pub async fn update_thought(&self, id: &ThoughtId, title: &str, content: &str) -> Result<()> {
        let sql = format!(
            r#"
            UPDATE thought
            SET title = ?,
                content = ?,
                update_time = MAX(
                    {now},
                    strftime('%Y-%m-%dT%H:%M:%fZ', update_time, '+0.001 seconds')
                )
            WHERE id = ?
            "#,
            now = SQL_NOW
        );

        let result = sqlx::query(&sql)
            .bind(title)
            .bind(content)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NoRowUpdated(format!("Thought {}", id)));
        }

        Ok(())
    }

    /// Get a thought by ID.
    pub async fn get_thought(&self, id: &ThoughtId) -> Result<Thought> {
        sqlx::query_as::<_, ThoughtRow>(
            r#"
            SELECT id, title, content, create_time, update_time
            FROM thought
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Thought not found: {}", id)))?
        .into_thought()
    }

    /// List all thoughts, oldest first.
    pub async fn get_all_thoughts(&self) -> Result<Vec<Thought>> {
        sqlx::query_as::<_, ThoughtRow>(
            r#"
            SELECT id, title, content, create_time, update_time
            FROM thought
            ORDER BY create_time ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ThoughtRow::into_thought)
        .collect()
    }
}

fn new_thought(title: &str, content: &str) -> Thought {
    let now = now();
    Thought {
        id: ThoughtId::new(),
        title: title.to_string(),
        content: content.to_string(),
        create_time: now,
        update_time: now,
    }
}
