// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value state operations on the `kv_state` table.

use chalkboard_core::ChalkboardError;
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

/// Read the value stored under `key`.
pub async fn get_value(db: &Database, key: &str) -> Result<Option<String>, ChalkboardError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or overwrite the value stored under `key`.
pub async fn put_value(db: &Database, key: &str, value: &str) -> Result<(), ChalkboardError> {
    let key = key.to_string();
    let value = value.to_string();
    let updated_at = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO kv_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete `key`. Returns whether a row was removed.
pub async fn delete_value(db: &Database, key: &str) -> Result<bool, ChalkboardError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute("DELETE FROM kv_state WHERE key = ?1", params![key])?;
            Ok(removed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Timestamp of the last write to `key`, if present.
pub async fn get_updated_at(db: &Database, key: &str) -> Result<Option<String>, ChalkboardError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT updated_at FROM kv_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db").to_string_lossy().into_owned();
        let db = Database::open(&path, true).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn missing_key_reads_none() {
        let (_dir, db) = test_db().await;
        assert_eq!(get_value(&db, "chat_history").await.unwrap(), None);
        assert_eq!(get_updated_at(&db, "chat_history").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get() {
        let (_dir, db) = test_db().await;
        put_value(&db, "display_mode", "\"dark\"").await.unwrap();
        assert_eq!(
            get_value(&db, "display_mode").await.unwrap().as_deref(),
            Some("\"dark\"")
        );
        assert!(get_updated_at(&db, "display_mode").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn put_overwrites_previous_value() {
        let (_dir, db) = test_db().await;
        put_value(&db, "k", "one").await.unwrap();
        put_value(&db, "k", "two").await.unwrap();
        assert_eq!(get_value(&db, "k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let (_dir, db) = test_db().await;
        put_value(&db, "k", "v").await.unwrap();
        assert!(delete_value(&db, "k").await.unwrap());
        assert!(!delete_value(&db, "k").await.unwrap());
        assert_eq!(get_value(&db, "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let (_dir, db) = test_db().await;
        put_value(&db, "a", "1").await.unwrap();
        put_value(&db, "b", "2").await.unwrap();
        delete_value(&db, "a").await.unwrap();
        assert_eq!(get_value(&db, "b").await.unwrap().as_deref(), Some("2"));
    }
}
