// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini model adapter for Chalkboard.
//!
//! This crate implements [`ModelAdapter`] over the Generative Language
//! `generateContent` endpoint: one prompt in, the first candidate's text out.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use chalkboard_config::model::GeminiConfig;
use chalkboard_config::model::GEMINI_API_KEY_ENV_VAR;
use chalkboard_core::error::{ChalkboardError, ProviderFailure};
use chalkboard_core::traits::{ModelAdapter, PluginAdapter};
use chalkboard_core::types::{
    AdapterType, GenerateRequest, GenerateResponse, HealthStatus, TokenUsage,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini provider implementing [`ModelAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    pub fn new(config: &GeminiConfig) -> Result<Self, ChalkboardError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ChalkboardError::Config(format!(
                "Gemini API key not found. Set gemini.api_key in config or the {GEMINI_API_KEY_ENV_VAR} environment variable."
            ))
        })?;

        let client = GeminiClient::new(
            &api_key,
            config.model.clone(),
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(model = config.model, "Gemini provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Model
    }

    async fn health_check(&self) -> Result<HealthStatus, ChalkboardError> {
        // Model metadata lookup authenticates the key without spending tokens.
        match self.client.get_model(self.client.default_model()).await {
            Ok(info) => {
                debug!(model = info.name, "Gemini model reachable");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), ChalkboardError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ModelAdapter for GeminiProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ChalkboardError> {
        let model = request
            .model
            .unwrap_or_else(|| self.client.default_model().to_string());
        let body = GenerateContentRequest::from_prompt(request.prompt);
        let response = self.client.generate_content(&model, &body).await?;
        into_generate_response(response, model)
    }
}

/// Extracts the answer text verbatim, whatever its length.
///
/// Only a blocked prompt, a blocked candidate, or a response with no
/// candidate at all is an error.
fn into_generate_response(
    response: GenerateContentResponse,
    requested_model: String,
) -> Result<GenerateResponse, ChalkboardError> {
    if response.candidates.is_empty() {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(ChalkboardError::provider(
                ProviderFailure::Blocked,
                format!("prompt was blocked: {reason}"),
            ));
        }
        return Err(ChalkboardError::provider(
            ProviderFailure::Empty,
            "response contained no candidates",
        ));
    }

    let finish_reason = response.candidates[0].finish_reason.clone();
    let text = response.first_candidate_text().unwrap_or_default();

    if let Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) =
        finish_reason.as_deref()
        && text.is_empty()
    {
        return Err(ChalkboardError::provider(
            ProviderFailure::Blocked,
            format!("response was blocked: {reason}"),
        ));
    }

    let usage = response.usage_metadata.map(|u| TokenUsage {
        prompt_tokens: u.prompt_token_count,
        output_tokens: u.candidates_token_count,
    });

    Ok(GenerateResponse {
        text,
        model: response.model_version.unwrap_or(requested_model),
        finish_reason,
        usage,
    })
}
