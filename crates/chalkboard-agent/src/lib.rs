// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for Chalkboard.
//!
//! The [`Orchestrator`] takes user text, builds the persona prompt, calls the
//! model collaborator, and keeps the conversation, error notice and display
//! mode in sync with the state store.

pub mod classify;
pub mod orchestrator;

pub use classify::{FailureClass, classify_failure};
pub use orchestrator::{ChatView, Orchestrator, SubmitOutcome, TurnState};
