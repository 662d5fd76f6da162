mod admin;
mod images;
mod leaderboard;
pub mod pool;
pub mod tables;
mod users;

pub use pool::create_pool;
pub use tables::RecordKind;

use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Handle to the record store (cheap to clone, shared across handlers)
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    path: PathBuf,
}

impl Store {
    /// Open or create the SQLite database at the given path
    ///
    /// Creates all required tables on first run.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        tracing::info!("Opening database at: {:?}", path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    tracing::error!("Failed to create database directory: {}", e);
                    e
                })?;
            }
        }

        let pool = create_pool(&path).await?;
        let store = Self { pool, path };
        store.create_schema().await?;

        tracing::info!("Database initialized successfully");

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cheap round trip used by the health check
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for kind in RecordKind::ALL {
            sqlx::query(kind.create_sql()).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
