// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment errors into miette diagnostics with "did you mean?" hints.
//!
//! The config file has four small sections, so a diagnostic names the
//! dotted key instead of pointing at a source span.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::Diagnostic;
use thiserror::Error;

/// Jaro-Winkler score a candidate must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, rendered by [`render_errors`].
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(chalkboard::config::unknown_key),
        help("{}", did_you_mean(suggestion.as_deref(), "valid keys", valid_keys))
    )]
    UnknownKey {
        /// Dotted path, e.g. `gemini.modle`.
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
    },

    #[error("invalid type for `{key}`: found {found}")]
    #[diagnostic(code(chalkboard::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    /// An enum-valued key (such as `persona.variant`) has an unrecognized value.
    #[error("unknown value `{value}` for `{key}`")]
    #[diagnostic(
        code(chalkboard::config::unknown_value),
        help("{}", did_you_mean(suggestion.as_deref(), "allowed values", allowed))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        allowed: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(chalkboard::config::missing_key),
        help("add `{key} = <value>` to your chalkboard.toml")
    )]
    MissingKey { key: String },

    /// A value parsed but failed a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(chalkboard::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(chalkboard::config::other))]
    Other(String),
}

fn did_you_mean(suggestion: Option<&str>, what: &str, choices: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {what}: {choices}"),
        None => format!("{what}: {choices}"),
    }
}

/// Converts every error Figment collected into a [`ConfigError`].
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let path = error.path.join(".");
            match error.kind {
                Kind::UnknownField(field, expected) => ConfigError::UnknownKey {
                    key: join_key(&error.path, &field),
                    suggestion: closest(&field, expected),
                    valid_keys: expected.join(", "),
                },
                Kind::UnknownVariant(value, allowed) => ConfigError::UnknownValue {
                    key: path,
                    suggestion: closest(&value, allowed),
                    allowed: allowed.join(", "),
                    value,
                },
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: join_key(&error.path, &field),
                },
                Kind::InvalidType(found, expected) => ConfigError::InvalidType {
                    key: path,
                    found: found.to_string(),
                    expected,
                },
                other if path.is_empty() => ConfigError::Other(other.to_string()),
                other => ConfigError::Other(format!("{path}: {other}")),
            }
        })
        .collect()
}

/// Appends `field` to the error path unless the path already ends with it.
fn join_key(path: &[String], field: &str) -> String {
    let mut parts = path.to_vec();
    if parts.last().map(String::as_str) != Some(field) {
        parts.push(field.to_string());
    }
    parts.join(".")
}

/// Closest candidate by Jaro-Winkler similarity, if any clears the threshold.
pub fn closest(input: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(input, c), *c))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.to_string())
}

/// Prints each error to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
