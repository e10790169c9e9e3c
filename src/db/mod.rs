//! Database layer for scatter-brain.
//!
//! Provides SQLite connection pooling and one store per table:
//! thoughts, labels and the thought-label associations.

mod labels;
mod pool;
mod thought_labels;
mod thoughts;

pub use labels::*;
pub use pool::*;
pub use thought_labels::*;
pub use thoughts::*;

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use std::path::Path;
use tracing::{debug, info};

/// Type alias for the SQLite connection pool.
pub type DbPool = sqlx::SqlitePool;

/// SQL expression for the database clock, in the same text format as
/// [`format_timestamp`].
pub(crate) const SQL_NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Initialize the database connection pool.
///
/// Creates parent directories if needed.
pub async fn init_pool(path: &str, config: &PoolConfig) -> Result<DbPool> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = config.build_connect_options(path)?;
    let pool = config.build_pool_options().connect_with(options).await?;

    info!("Database pool initialized: {}", path);

    Ok(pool)
}

/// Execute DDL statements in order. Each is expected to be idempotent.
pub(crate) async fn execute_schemas(pool: &DbPool, schemas: &[&str]) -> Result<()> {
    for schema in schemas {
        debug!(schema = %schema.trim(), "Executing schema statement");
        sqlx::query(schema).execute(pool).await?;
    }
    Ok(())
}

/// Current time, truncated to the millisecond precision the store keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Format a timestamp for storage, e.g. `2024-05-01T09:30:00.250Z`.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid stored timestamp '{}': {}", s, e)))
}

#[cfg(test)]
pub(crate) async fn setup_test_db() -> DbPool {
    let pool = init_pool(":memory:", &PoolConfig::test()).await.unwrap();
    ThoughtStore::new(pool.clone()).initialize().await.unwrap();
    LabelStore::new(pool.clone()).initialize().await.unwrap();
    ThoughtLabelStore::new(pool.clone()).initialize().await.unwrap();
    pool
}
