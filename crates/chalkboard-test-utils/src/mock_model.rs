// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model adapter for deterministic testing.
//!
//! `MockModel` implements `ModelAdapter` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use chalkboard_core::traits::{ModelAdapter, PluginAdapter};
use chalkboard_core::types::{AdapterType, GenerateRequest, GenerateResponse, HealthStatus};
use chalkboard_core::{ChalkboardError, ProviderFailure};

/// A mock model that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every prompt is recorded.
pub struct MockModel {
    outcomes: Mutex<VecDeque<Result<String, ProviderFailure>>>,
    prompts: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
}

impl MockModel {
    /// Create a new mock model with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Create a mock model pre-loaded with successful responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Mutex::new(responses.into_iter().map(Ok).collect()),
            ..Self::new()
        }
    }

    /// Create a mock model whose calls block until [`release`](Self::release).
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    /// Let one pending or future call of a gated model proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Queue a successful response.
    pub async fn push_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failed call.
    pub async fn push_failure(&self, kind: ProviderFailure) {
        self.outcomes.lock().await.push_back(Err(kind));
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }

    async fn next_outcome(&self) -> Result<String, ProviderFailure> {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Model
    }

    async fn health_check(&self) -> Result<HealthStatus, ChalkboardError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ChalkboardError> {
        Ok(())
    }
}

#[async_trait]
impl ModelAdapter for MockModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ChalkboardError> {
        self.prompts.lock().await.push(request.prompt);

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.map_err(|e| {
                ChalkboardError::Internal(format!("mock model gate closed: {e}"))
            })?;
            permit.forget();
        }

        match self.next_outcome().await {
            Ok(text) => Ok(GenerateResponse {
                text,
                model: request.model.unwrap_or_else(|| "mock-model".to_string()),
                finish_reason: Some("STOP".to_string()),
                usage: None,
            }),
            Err(kind) => Err(ChalkboardError::provider(kind, "mock model failure")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outcomes_are_served_in_order_then_default() {
        let model = MockModel::with_responses(vec!["first".into()]);
        model.push_failure(ProviderFailure::Status(500)).await;

        let first = model.generate(GenerateRequest::new("a")).await.unwrap();
        assert_eq!(first.text, "first");
        assert!(model.generate(GenerateRequest::new("b")).await.is_err());
        let fallback = model.generate(GenerateRequest::new("c")).await.unwrap();
        assert_eq!(fallback.text, "mock response");

        assert_eq!(model.prompts().await, vec!["a", "b", "c"]);
        assert_eq!(model.call_count().await, 3);
    }

    #[tokio::test]
    async fn gated_model_waits_for_release() {
        let model = std::sync::Arc::new(MockModel::gated());
        model.push_response("late").await;

        let pending = {
            let model = model.clone();
            tokio::spawn(async move { model.generate(GenerateRequest::new("q")).await })
        };
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        model.release();
        let response = pending.await.unwrap().unwrap();
        assert_eq!(response.text, "late");
    }
}
