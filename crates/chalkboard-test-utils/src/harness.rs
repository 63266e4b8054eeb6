// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles an [`Orchestrator`] with a mock model, an
//! in-memory store and a scripted confirmer. Provides `send()` to drive a
//! full turn in tests and `restart()` to simulate a process restart over the
//! same store.

use std::sync::Arc;

use chalkboard_agent::{Orchestrator, SubmitOutcome};
use chalkboard_core::{ChalkboardError, Conversation, PersonaVariant, ProviderFailure, StateKey};
use chalkboard_persona::Persona;

use crate::confirmer::ScriptedConfirmer;
use crate::memory_store::MemoryStore;
use crate::mock_model::MockModel;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    variant: PersonaVariant,
    outcomes: Vec<Result<String, ProviderFailure>>,
    confirm_answers: Vec<bool>,
    confirm_fallback: bool,
    seeds: Vec<(StateKey, String)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            variant: PersonaVariant::Supportive,
            outcomes: Vec::new(),
            confirm_answers: Vec::new(),
            confirm_fallback: true,
            seeds: Vec::new(),
        }
    }

    /// Select the built-in persona.
    pub fn with_persona(mut self, variant: PersonaVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Queue successful model responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.outcomes.extend(responses.into_iter().map(Ok));
        self
    }

    /// Queue a failed model call.
    pub fn with_mock_failure(mut self, kind: ProviderFailure) -> Self {
        self.outcomes.push(Err(kind));
        self
    }

    /// Script the answers to confirmation prompts; later prompts get `fallback`.
    pub fn with_confirmations(mut self, answers: Vec<bool>, fallback: bool) -> Self {
        self.confirm_answers = answers;
        self.confirm_fallback = fallback;
        self
    }

    /// Pre-populate the store as if a previous session had written `value`.
    pub fn with_stored(mut self, key: StateKey, value: impl Into<String>) -> Self {
        self.seeds.push((key, value.into()));
        self
    }

    /// Build the harness and restore the orchestrator from the seeded store.
    pub async fn build(self) -> Result<TestHarness, ChalkboardError> {
        let persona = Arc::new(Persona::builtin(self.variant)?);

        let model = Arc::new(MockModel::new());
        for outcome in self.outcomes {
            match outcome {
                Ok(text) => model.push_response(text).await,
                Err(kind) => model.push_failure(kind).await,
            }
        }

        let store = Arc::new(MemoryStore::new());
        for (key, value) in self.seeds {
            store.insert(key, value).await;
        }

        let confirmer = Arc::new(ScriptedConfirmer::with_answers(
            self.confirm_answers,
            self.confirm_fallback,
        ));

        let orchestrator = Orchestrator::restore(
            persona.clone(),
            model.clone(),
            store.clone(),
            confirmer.clone(),
        )
        .await;

        Ok(TestHarness {
            orchestrator,
            persona,
            model,
            store,
            confirmer,
        })
    }
}

/// A complete test environment with mock collaborators.
pub struct TestHarness {
    /// The orchestrator under test.
    pub orchestrator: Orchestrator,
    /// The persona injected into the orchestrator.
    pub persona: Arc<Persona>,
    /// The mock model.
    pub model: Arc<MockModel>,
    /// The in-memory state store.
    pub store: Arc<MemoryStore>,
    /// The scripted confirmer.
    pub confirmer: Arc<ScriptedConfirmer>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Submit one line of user input.
    pub async fn send(&mut self, text: &str) -> SubmitOutcome {
        self.orchestrator.submit(text).await
    }

    /// Replace the orchestrator with a fresh one restored from the same store.
    pub async fn restart(&mut self) {
        self.orchestrator = Orchestrator::restore(
            self.persona.clone(),
            self.model.clone(),
            self.store.clone(),
            self.confirmer.clone(),
        )
        .await;
    }

    /// The conversation currently persisted, if it parses.
    pub async fn stored_conversation(&self) -> Option<Conversation> {
        let raw = self.store.get(StateKey::ChatHistory).await?;
        serde_json::from_str(&raw).ok()
    }
}
