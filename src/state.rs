//! Application state for scatter-brain.
//!
//! The request processor: one instance of each store over a shared pool,
//! handed to the router as axum state.

use tracing::info;

use crate::db::{self, DbPool, LabelStore, PoolConfig, ThoughtLabelStore, ThoughtStore};
use crate::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thought storage.
    pub thoughts: ThoughtStore,
    /// Label storage.
    pub labels: LabelStore,
    /// Thought-label association storage.
    pub thought_labels: ThoughtLabelStore,
}

impl AppState {
    /// Compose the stores over one pool. Does not touch the schema.
    pub fn new(pool: DbPool) -> Self {
        Self {
            thoughts: ThoughtStore::new(pool.clone()),
            labels: LabelStore::new(pool.clone()),
            thought_labels: ThoughtLabelStore::new(pool),
        }
    }

    /// Open the database at `path`, then build and initialize the state.
    pub async fn connect(path: &str, pool_config: &PoolConfig) -> Result<Self> {
        let pool = db::init_pool(path, pool_config).await?;
        let state = Self::new(pool);
        state.init().await?;
        Ok(state)
    }

    /// Create every table. Associations reference both entity tables, so
    /// they go last.
    pub async fn init(&self) -> Result<()> {
        info!("Initializing database schema");

        self.thoughts.initialize().await?;
        self.labels.initialize().await?;
        self.thought_labels.initialize().await?;

        info!("Database schema initialized successfully");
        Ok(())
    }
}
