// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Adapters backed by I/O extend [`PluginAdapter`] and use `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod adapter;
pub mod confirm;
pub mod model;
pub mod storage;

pub use adapter::PluginAdapter;
pub use confirm::Confirmer;
pub use model::ModelAdapter;
pub use storage::StateStore;
