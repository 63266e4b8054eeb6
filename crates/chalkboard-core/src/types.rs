// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the orchestrator, the collaborators, and the renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One utterance in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// The literal content, never post-processed.
    pub text: String,
    pub speaker: Speaker,
    /// Display-only timestamp. Insertion order is authoritative.
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Creates a user turn stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::User,
            created_at: Utc::now(),
        }
    }

    /// Creates an assistant turn stamped with the current time.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::Assistant,
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

/// An ordered, append-only sequence of turns.
///
/// Serializes transparently as a JSON array so the persisted form is just
/// the list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn and returns a reference to it.
    pub fn push_user(&mut self, text: impl Into<String>) -> &Turn {
        self.push(Turn::user(text))
    }

    /// Appends an assistant turn and returns a reference to it.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> &Turn {
        self.push(Turn::assistant(text))
    }

    fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        // Just pushed, so the vector is non-empty.
        &self.turns[self.turns.len() - 1]
    }

    /// Drops every turn. Only reachable through an explicit, confirmed clear.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// Light/dark presentation preference, persisted independently of the conversation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }
}

/// Which built-in teacher persona to run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PersonaVariant {
    /// Encouraging, patient, warm.
    #[default]
    Supportive,
    /// Sarcastic, exacting, impatient.
    Harsh,
}

/// The two keys of the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum StateKey {
    /// Serialized turn sequence.
    ChatHistory,
    /// Serialized display-mode flag.
    DisplayMode,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Model,
    Storage,
}

/// A request to the language-model collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// The fully composed prompt text.
    pub prompt: String,
    /// Model override; `None` uses the adapter's configured model.
    pub model: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }
}

/// Token accounting reported by the model, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub output_tokens: u32,
}

/// A response from the language-model collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Response text, passed to the conversation verbatim.
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}
