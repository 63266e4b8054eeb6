// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model adapter trait for the external language-model call.

use async_trait::async_trait;

use crate::error::ChalkboardError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerateRequest, GenerateResponse};

/// Adapter for the language-model service.
///
/// Text in, text out. Timeouts belong to the implementation; callers treat
/// every error the same way.
#[async_trait]
pub trait ModelAdapter: PluginAdapter {
    /// Sends the prompt and returns the full response.
    async fn generate(&self, request: GenerateRequest)
    -> Result<GenerateResponse, ChalkboardError>;
}
