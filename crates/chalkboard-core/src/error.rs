// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Chalkboard.

use thiserror::Error;

/// The primary error type used across all Chalkboard collaborators.
#[derive(Debug, Error)]
pub enum ChalkboardError {
    /// Configuration errors (invalid TOML, missing API key, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Language-model call failures (transport, HTTP status, malformed body).
    #[error("provider error: {message}")]
    Provider {
        kind: ProviderFailure,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persona data could not be loaded or parsed.
    #[error("persona error: {0}")]
    Persona(String),

    /// Adapter health check failed.
    #[error("health check failed for {name}: {source}")]
    HealthCheckFailed {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChalkboardError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(kind: ProviderFailure, message: impl Into<String>) -> Self {
        Self::Provider {
            kind,
            message: message.into(),
            source: None,
        }
    }
}

/// What went wrong while talking to the language model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Connection refused, DNS failure, timeout.
    Transport,
    /// The API answered with a non-success HTTP status.
    Status(u16),
    /// The response body could not be decoded.
    Malformed,
    /// The prompt or every candidate was blocked by the service.
    Blocked,
    /// The response decoded but carried no candidate.
    Empty,
}
