// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Chalkboard integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockModel`] - Mock model with pre-configured outcomes
//! - [`MemoryStore`] - In-memory state store with write counters
//! - [`ScriptedConfirmer`] - Confirmation collaborator driven by a script
//! - [`TestHarness`] - An orchestrator wired to all of the above

pub mod confirmer;
pub mod harness;
pub mod memory_store;
pub mod mock_model;

pub use confirmer::ScriptedConfirmer;
pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory_store::MemoryStore;
pub use mock_model::MockModel;
