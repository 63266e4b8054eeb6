// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Teacher personas for Chalkboard.
//!
//! A [`Persona`] bundles the character description, the prompt template and
//! the user-facing copy for one teacher. Two personas ship built in; a custom
//! one can be loaded from a JSON file with the same shape.

pub mod config;
pub mod prompt;
pub mod template;

use std::path::Path;

use chalkboard_core::{ChalkboardError, PersonaVariant};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::{BehaviorRules, Classroom, PersonaConfig, Personality, TriggerList};
pub use prompt::build_prompt;
pub use template::{Accent, PersonaCopy, PromptTemplate};

use template::NAME_TOKEN;

const SUPPORTIVE_JSON: &str = include_str!("../personas/supportive.json");
const HARSH_JSON: &str = include_str!("../personas/harsh.json");

/// Everything variant-specific about a teacher, as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Persona {
    #[serde(default)]
    pub variant: PersonaVariant,
    #[serde(default)]
    pub accent: Accent,
    #[serde(rename = "persona")]
    pub config: PersonaConfig,
    pub template: PromptTemplate,
    pub copy: PersonaCopy,
}

impl Persona {
    /// Returns one of the built-in personas.
    pub fn builtin(variant: PersonaVariant) -> Result<Self, ChalkboardError> {
        let raw = match variant {
            PersonaVariant::Supportive => SUPPORTIVE_JSON,
            PersonaVariant::Harsh => HARSH_JSON,
        };
        Self::from_json(raw)
    }

    /// Parses and validates a persona document.
    pub fn from_json(raw: &str) -> Result<Self, ChalkboardError> {
        let persona: Persona = serde_json::from_str(raw)
            .map_err(|e| ChalkboardError::Persona(format!("invalid persona document: {e}")))?;
        persona.validate()?;
        Ok(persona)
    }

    /// Reads a persona document from disk.
    pub fn from_file(path: &Path) -> Result<Self, ChalkboardError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ChalkboardError::Persona(format!("cannot read {}: {e}", path.display()))
        })?;
        let persona = Self::from_json(&raw)?;
        debug!(path = %path.display(), name = %persona.name(), "loaded persona file");
        Ok(persona)
    }

    /// Loads the persona file when given, otherwise the built-in variant.
    pub fn load(variant: PersonaVariant, file: Option<&Path>) -> Result<Self, ChalkboardError> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::builtin(variant),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Welcome heading with the persona name filled in.
    pub fn welcome_title(&self) -> String {
        self.copy.welcome_title.replace(NAME_TOKEN, self.name())
    }

    /// Input placeholder with the persona name filled in.
    pub fn input_hint(&self) -> String {
        self.copy.input_hint.replace(NAME_TOKEN, self.name())
    }

    fn validate(&self) -> Result<(), ChalkboardError> {
        let mut problems = Vec::new();
        if self.config.name.trim().is_empty() {
            problems.push("persona.name must not be empty");
        }
        if self.template.role_descriptor.trim().is_empty() {
            problems.push("template.roleDescriptor must not be empty");
        }
        if self.template.directives.is_empty() {
            problems.push("template.directives must contain at least one directive");
        }
        if self.copy.fallback_error.trim().is_empty() {
            problems.push("copy.fallbackError must not be empty");
        }
        if self.copy.clear_prompt.trim().is_empty() {
            problems.push("copy.clearPrompt must not be empty");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ChalkboardError::Persona(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_personas_load() {
        let supportive = Persona::builtin(PersonaVariant::Supportive).unwrap();
        assert_eq!(supportive.variant, PersonaVariant::Supportive);
        assert_eq!(supportive.accent, Accent::Indigo);
        assert_eq!(supportive.name(), "Ms. Harper");
        assert_eq!(supportive.template.directives.len(), 5);

        let harsh = Persona::builtin(PersonaVariant::Harsh).unwrap();
        assert_eq!(harsh.variant, PersonaVariant::Harsh);
        assert_eq!(harsh.accent, Accent::Crimson);
        assert_eq!(harsh.name(), "Mr. Grimsby");
    }

    #[test]
    fn builtin_fallback_copy_matches_variant() {
        let supportive = Persona::builtin(PersonaVariant::Supportive).unwrap();
        assert!(supportive.copy.fallback_error.starts_with("I'm having a bit of trouble connecting"));
        let harsh = Persona::builtin(PersonaVariant::Harsh).unwrap();
        assert!(harsh.copy.fallback_error.starts_with("Wonderful. The connection broke"));
    }

    #[test]
    fn name_token_is_filled_in_copy() {
        let persona = Persona::builtin(PersonaVariant::Supportive).unwrap();
        assert_eq!(persona.welcome_title(), "Welcome to Ms. Harper's Classroom!");
        assert_eq!(persona.input_hint(), "Ask Ms. Harper anything...");
    }

    #[test]
    fn malformed_document_is_a_persona_error() {
        let err = Persona::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ChalkboardError::Persona(_)));
        assert!(err.to_string().contains("invalid persona document"));
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut persona = Persona::builtin(PersonaVariant::Harsh).unwrap();
        persona.config.name = "  ".into();
        persona.template.directives.clear();
        let raw = serde_json::to_string(&persona).unwrap();

        let err = Persona::from_json(&raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("persona.name"));
        assert!(msg.contains("template.directives"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(SUPPORTIVE_JSON).unwrap();
        value["copy"]["unexpected"] = serde_json::Value::from("x");
        let err = Persona::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("unexpected"));
    }

    #[test]
    fn load_prefers_file_over_variant() {
        let mut persona = Persona::builtin(PersonaVariant::Supportive).unwrap();
        persona.config.name = "Dr. Okafor".into();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&persona).unwrap().as_bytes())
            .unwrap();

        let loaded = Persona::load(PersonaVariant::Harsh, Some(file.path())).unwrap();
        assert_eq!(loaded.name(), "Dr. Okafor");

        let builtin = Persona::load(PersonaVariant::Harsh, None).unwrap();
        assert_eq!(builtin.name(), "Mr. Grimsby");
    }

    #[test]
    fn missing_file_is_a_persona_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Persona::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ChalkboardError::Persona(_)));
    }
}
