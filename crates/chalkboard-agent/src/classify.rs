// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of model-call failures.
//!
//! This is the only place that inspects a failed call. Every class currently
//! produces the same persona fallback notice; the class goes to the log.

use chalkboard_core::{ChalkboardError, ProviderFailure};
use strum::Display;

/// Coarse category of a failed model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureClass {
    /// Connection refused, DNS failure, timeout.
    Network,
    /// 429 from the API.
    RateLimited,
    /// 401 or 403: bad or missing API key.
    Auth,
    /// Other 4xx.
    InvalidRequest,
    /// 5xx.
    ServerError,
    /// Prompt or answer blocked by the service.
    Blocked,
    /// Response could not be decoded.
    Malformed,
    /// Response decoded but had no text.
    Empty,
    /// Anything that did not come from the model adapter.
    Unknown,
}

/// Maps an error from the model collaborator to a [`FailureClass`].
pub fn classify_failure(err: &ChalkboardError) -> FailureClass {
    match err {
        ChalkboardError::Provider { kind, .. } => match kind {
            ProviderFailure::Transport => FailureClass::Network,
            ProviderFailure::Status(429) => FailureClass::RateLimited,
            ProviderFailure::Status(401 | 403) => FailureClass::Auth,
            ProviderFailure::Status(code) if (500..600).contains(code) => {
                FailureClass::ServerError
            }
            ProviderFailure::Status(_) => FailureClass::InvalidRequest,
            ProviderFailure::Blocked => FailureClass::Blocked,
            ProviderFailure::Malformed => FailureClass::Malformed,
            ProviderFailure::Empty => FailureClass::Empty,
        },
        _ => FailureClass::Unknown,
    }
}
