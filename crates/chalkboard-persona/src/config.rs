// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona character data.
//!
//! Field names follow the camelCase JSON documents under `personas/`.

use serde::{Deserialize, Serialize};

/// Static description of the teacher character the model plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonaConfig {
    pub name: String,
    pub personality: Personality,
    pub emotional_depth: String,
    pub classroom: Classroom,
    /// Ordered trigger lists, rendered in document order.
    pub emotional_triggers: Vec<TriggerList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Personality {
    pub traits: Vec<String>,
    pub communication_style: String,
    pub teaching_style: String,
    pub humor_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Classroom {
    pub reputation: String,
    pub concerns: Vec<String>,
    pub common_phrases: Vec<String>,
    pub behavior: BehaviorRules,
}

/// Free-text directive per behavior category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BehaviorRules {
    pub apologies: String,
    pub mistakes: String,
    pub jokes: String,
    pub teaching: String,
}

/// A labelled list of emotional triggers, e.g. "You get happy when".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerList {
    pub label: String,
    pub items: Vec<String>,
}
