// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory state store with write accounting.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use chalkboard_core::{ChalkboardError, StateKey, StateStore};

/// A `StateStore` backed by a map.
///
/// Counts successful writes and removals so tests can assert what was
/// persisted. A failing store rejects every save and remove.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StateKey, String>>,
    writes: AtomicUsize,
    removes: AtomicUsize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves and removes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seed a value without counting it as a write.
    pub async fn insert(&self, key: StateKey, value: impl Into<String>) {
        self.values.lock().await.insert(key, value.into());
    }

    /// Current value of `key`.
    pub async fn get(&self, key: StateKey) -> Option<String> {
        self.values.lock().await.get(&key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), ChalkboardError> {
        if self.fail_writes {
            return Err(ChalkboardError::Storage {
                source: "memory store is read-only".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self, key: StateKey) -> Result<Option<String>, ChalkboardError> {
        Ok(self.get(key).await)
    }

    async fn save(&self, key: StateKey, value: &str) -> Result<(), ChalkboardError> {
        self.check_writable()?;
        self.values.lock().await.insert(key, value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: StateKey) -> Result<(), ChalkboardError> {
        self.check_writable()?;
        self.values.lock().await.remove(&key);
        self.removes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
