// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confirmation collaborator used by destructive user actions.

/// A blocking yes/no prompt.
pub trait Confirmer: Send + Sync {
    /// Shows `prompt` and returns `true` only on an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;
}
