// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-variant prompt template and user-facing copy.

use serde::{Deserialize, Serialize};

/// Token replaced with the persona's humor style inside a directive.
pub const HUMOR_STYLE_TOKEN: &str = "{humor_style}";

/// Token replaced with the persona's name inside copy strings.
pub const NAME_TOKEN: &str = "{name}";

/// The fixed, variant-specific parts of the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PromptTemplate {
    /// Completes "You are {name}, ..." (e.g. "a supportive teacher AI").
    pub role_descriptor: String,
    /// Numbered response-style directives, in order.
    pub directives: Vec<String>,
    /// Tone summary placed after the directives.
    pub closing: String,
    /// Lead-in placed right before the user's text.
    pub student_label: String,
}

/// Static strings shown to the user rather than sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonaCopy {
    /// Error notice shown for every failed model call.
    pub fallback_error: String,
    /// Question asked before clearing the conversation.
    pub clear_prompt: String,
    pub status_line: String,
    pub motto: String,
    pub welcome_title: String,
    pub welcome_body: String,
    pub welcome_quote: String,
    pub input_hint: String,
}

/// Theme colour family of a persona.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Indigo,
    Crimson,
}
