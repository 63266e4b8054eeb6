// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StateStore trait.

use async_trait::async_trait;
use tracing::debug;

use chalkboard_config::model::StorageConfig;
use chalkboard_core::{
    AdapterType, ChalkboardError, HealthStatus, PluginAdapter, StateKey, StateStore,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed state store.
///
/// Wraps a [`Database`] handle and delegates to the typed query module.
/// Each [`StateKey`] is one row of `kv_state`.
pub struct SqliteStore {
    path: String,
    db: Database,
}

impl SqliteStore {
    /// Opens the database described by `config` and applies migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, ChalkboardError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite state store opened");
        Ok(Self {
            path: config.database_path.clone(),
            db,
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Timestamp of the last write to `key`, if any.
    pub async fn updated_at(&self, key: StateKey) -> Result<Option<String>, ChalkboardError> {
        queries::state::get_updated_at(&self.db, key.as_ref()).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ChalkboardError> {
        self.db
            .connection()
            .call(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ChalkboardError> {
        if self.db.wal_mode() {
            self.db.checkpoint().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for SqliteStore {
    async fn load(&self, key: StateKey) -> Result<Option<String>, ChalkboardError> {
        queries::state::get_value(&self.db, key.as_ref()).await
    }

    async fn save(&self, key: StateKey, value: &str) -> Result<(), ChalkboardError> {
        queries::state::put_value(&self.db, key.as_ref(), value).await
    }

    async fn remove(&self, key: StateKey) -> Result<(), ChalkboardError> {
        let removed = queries::state::delete_value(&self.db, key.as_ref()).await?;
        debug!(key = %key, removed, "state key removed");
        Ok(())
    }
}
