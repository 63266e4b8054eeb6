// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! State store trait for the key-value persistence collaborator.

use async_trait::async_trait;

use crate::error::ChalkboardError;
use crate::types::StateKey;

/// Key-value persistence for the conversation and the display mode.
///
/// Values are opaque strings; serialization is the caller's concern. A
/// `save` overwrites the previous value for the key.
#[async_trait]
pub trait StateStore: Send + Sync + 'static {
    /// Reads the value stored under `key`, if any.
    async fn load(&self, key: StateKey) -> Result<Option<String>, ChalkboardError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn save(&self, key: StateKey, value: &str) -> Result<(), ChalkboardError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: StateKey) -> Result<(), ChalkboardError>;
}
