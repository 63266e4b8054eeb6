// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;
use std::time::Duration;

use chalkboard_core::ChalkboardError;
use tracing::debug;

use crate::migrations::run_migrations;

/// Maps a tokio-rusqlite error into the storage error variant.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> ChalkboardError {
    ChalkboardError::Storage {
        source: Box::new(e),
    }
}

fn map_sql_err(e: rusqlite::Error) -> ChalkboardError {
    ChalkboardError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the single writer connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    wal_mode: bool,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    ///
    /// Parent directories are created. Migrations run on a blocking thread
    /// with a short-lived connection before the writer connection is opened.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, ChalkboardError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ChalkboardError::Storage {
                source: Box::new(e),
            })?;
        }

        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), ChalkboardError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(map_sql_err)?;
            apply_pragmas(&conn, wal_mode).map_err(map_sql_err)?;
            run_migrations(&mut conn)
        })
        .await
        .map_err(|e| ChalkboardError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| ChalkboardError::Storage {
                source: Box::new(e),
            })?;
        conn.call(move |conn| apply_pragmas(conn, wal_mode))
            .await
            .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn, wal_mode })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    pub fn wal_mode(&self) -> bool {
        self.wal_mode
    }

    /// Reads the journal mode currently in effect.
    pub async fn journal_mode(&self) -> Result<String, ChalkboardError> {
        self.conn
            .call(|conn| {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get::<_, String>(0))
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoints the WAL back into the main database file.
    pub async fn checkpoint(&self) -> Result<(), ChalkboardError> {
        self.conn
            .call(|conn| {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

fn apply_pragmas(conn: &rusqlite::Connection, wal_mode: bool) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(Duration::from_secs(5))?;
    if wal_mode {
        // journal_mode returns the resulting mode as a row.
        let _mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
    }
    Ok(())
}
