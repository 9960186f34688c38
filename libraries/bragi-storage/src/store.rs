//! SQLite-backed snapshot store
//!
//! One keyed row holds the serialized session snapshot. Reads are tolerant:
//! a missing row or a value that no longer decodes yields `None`, so a
//! format change can never brick startup.

use crate::error::{Result, StorageError};
use async_trait::async_trait;
use bragi_core::types::{SessionSnapshot, SNAPSHOT_KEY};
use bragi_core::SnapshotStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, warn};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS session_snapshots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)";

/// Session snapshot storage over SQLite
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
    key: String,
}

impl SqliteSnapshotStore {
    /// Open (creating if missing) the database at `database_url` and ensure
    /// the schema exists.
    ///
    /// # Errors
    /// Returns an error if the connection or schema init fails
    pub async fn open(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Build a store over an existing pool, ensuring the schema exists
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| StorageError::Schema(e.to_string()))?;

        Ok(Self {
            pool,
            key: SNAPSHOT_KEY.to_string(),
        })
    }

    /// Use a different storage key (multiple profiles in one database)
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    async fn read_raw(&self) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM session_snapshots WHERE key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>(0)))
    }

    async fn write_raw(&self, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO session_snapshots (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key)
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(&self.key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_raw(&self) -> Result<bool> {
        let result = sqlx::query("DELETE FROM session_snapshots WHERE key = ?")
            .bind(&self.key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self) -> bragi_core::Result<Option<SessionSnapshot>> {
        let raw = self.read_raw().await?;

        Ok(raw.and_then(|value| {
            let decoded = SessionSnapshot::from_json_lossy(&value);
            if decoded.is_none() {
                warn!(key = %self.key, "stored session snapshot is unreadable; treating as absent");
            }
            decoded
        }))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> bragi_core::Result<()> {
        let value = snapshot.to_json()?;
        self.write_raw(&value).await?;
        debug!(key = %self.key, tracks = snapshot.queue.len(), "session snapshot saved");
        Ok(())
    }

    async fn delete(&self) -> bragi_core::Result<()> {
        let removed = self.delete_raw().await?;
        if removed {
            debug!(key = %self.key, "session snapshot deleted");
        }
        Ok(())
    }
}
