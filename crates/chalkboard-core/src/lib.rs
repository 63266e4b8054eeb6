// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Chalkboard.
//!
//! This crate provides the conversation data model, the error type, and the
//! collaborator traits (model, state store, confirmation) that the
//! orchestrator is written against. Concrete adapters live in their own
//! crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ChalkboardError, ProviderFailure};
pub use types::{
    AdapterType, Conversation, DisplayMode, GenerateRequest, GenerateResponse, HealthStatus,
    PersonaVariant, Speaker, StateKey, TokenUsage, Turn,
};

pub use traits::{Confirmer, ModelAdapter, PluginAdapter, StateStore};
