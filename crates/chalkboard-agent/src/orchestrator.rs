// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation turn lifecycle.
//!
//! [`Orchestrator`] owns the only mutable state of a chat: the conversation,
//! the transient error notice, the awaiting flag, and the display mode. Each
//! change is published as a [`ChatView`] snapshot on a watch channel so a
//! renderer can draw the user turn and typing indicator while the model call
//! is still pending.

use std::sync::Arc;

use chalkboard_core::{
    ChalkboardError, Confirmer, Conversation, DisplayMode, GenerateRequest, ModelAdapter,
    StateKey, StateStore, Turn,
};
use chalkboard_persona::{Persona, build_prompt};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::classify::classify_failure;

/// States in the turn FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for user input.
    Idle,
    /// A model call is in flight.
    AwaitingResponse,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::Idle => write!(f, "idle"),
            TurnState::AwaitingResponse => write!(f, "awaiting_response"),
        }
    }
}

/// Everything a renderer needs to draw the chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatView {
    pub conversation: Conversation,
    pub error: Option<String>,
    pub awaiting_response: bool,
    pub display_mode: DisplayMode,
}

/// Result of [`Orchestrator::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or a call already in flight. Nothing changed.
    Ignored,
    /// The model answered; the assistant turn that was appended.
    Answered(Turn),
    /// The model call failed; the notice now shown to the user.
    Failed(String),
}

/// Drives one chat: user input in, model call out, state persisted.
pub struct Orchestrator {
    persona: Arc<Persona>,
    model: Arc<dyn ModelAdapter>,
    store: Arc<dyn StateStore>,
    confirmer: Arc<dyn Confirmer>,
    conversation: Conversation,
    error: Option<String>,
    state: TurnState,
    display_mode: DisplayMode,
    view_tx: watch::Sender<ChatView>,
}

impl Orchestrator {
    /// Creates an orchestrator with an empty conversation and the default mode.
    pub fn new(
        persona: Arc<Persona>,
        model: Arc<dyn ModelAdapter>,
        store: Arc<dyn StateStore>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let (view_tx, _) = watch::channel(ChatView::default());
        Self {
            persona,
            model,
            store,
            confirmer,
            conversation: Conversation::new(),
            error: None,
            state: TurnState::Idle,
            display_mode: DisplayMode::default(),
            view_tx,
        }
    }

    /// Creates an orchestrator and loads the persisted conversation and mode.
    ///
    /// Absent or unreadable values fall back to the defaults.
    pub async fn restore(
        persona: Arc<Persona>,
        model: Arc<dyn ModelAdapter>,
        store: Arc<dyn StateStore>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let mut orchestrator = Self::new(persona, model, store, confirmer);
        orchestrator.conversation = orchestrator.load_history().await;
        orchestrator.display_mode = orchestrator.load_display_mode().await;
        debug!(
            turns = orchestrator.conversation.len(),
            display_mode = %orchestrator.display_mode,
            "orchestrator state restored"
        );
        orchestrator.publish();
        orchestrator
    }

    /// Handles one line of user input.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.state == TurnState::AwaitingResponse {
            debug!("submit ignored: a response is already pending");
            return SubmitOutcome::Ignored;
        }

        self.error = None;
        self.conversation.push_user(text);
        self.persist_history().await;
        self.state = TurnState::AwaitingResponse;
        self.publish();

        let prompt = build_prompt(&self.persona, text);
        debug!(
            turns = self.conversation.len(),
            prompt_len = prompt.len(),
            "calling model"
        );
        let result = self.model.generate(GenerateRequest::new(prompt)).await;

        let outcome = match result {
            Ok(response) => {
                let turn = self.conversation.push_assistant(response.text).clone();
                self.error = None;
                self.persist_history().await;
                debug!(model = %response.model, "model answered");
                SubmitOutcome::Answered(turn)
            }
            Err(err) => {
                let class = classify_failure(&err);
                warn!(class = %class, error = %err, "model call failed");
                let notice = self.persona.copy.fallback_error.clone();
                self.error = Some(notice.clone());
                SubmitOutcome::Failed(notice)
            }
        };

        self.state = TurnState::Idle;
        self.publish();
        outcome
    }

    /// Clears the conversation after the user confirms.
    ///
    /// Returns `false` and changes nothing when the user declines.
    pub async fn clear(&mut self) -> bool {
        if !self.confirmer.confirm(&self.persona.copy.clear_prompt) {
            debug!("clear declined");
            return false;
        }

        self.conversation.clear();
        self.error = None;
        if let Err(e) = self.store.remove(StateKey::ChatHistory).await {
            warn!(error = %e, "failed to remove persisted chat history");
        }
        self.publish();
        debug!("conversation cleared");
        true
    }

    /// Flips and persists the display mode, returning the new mode.
    pub async fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.persist_display_mode().await;
        self.publish();
        self.display_mode
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The current error notice, if the last call failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == TurnState::AwaitingResponse
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// A snapshot of the current state.
    pub fn view(&self) -> ChatView {
        ChatView {
            conversation: self.conversation.clone(),
            error: self.error.clone(),
            awaiting_response: self.is_awaiting(),
            display_mode: self.display_mode,
        }
    }

    /// Receives a new [`ChatView`] after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.view_tx.subscribe()
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }

    async fn persist_history(&self) {
        let result = match serde_json::to_string(&self.conversation) {
            Ok(json) => self.store.save(StateKey::ChatHistory, &json).await,
            Err(e) => Err(ChalkboardError::Internal(format!(
                "failed to serialize chat history: {e}"
            ))),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to persist chat history");
        }
    }

    async fn persist_display_mode(&self) {
        let result = match serde_json::to_string(&self.display_mode) {
            Ok(json) => self.store.save(StateKey::DisplayMode, &json).await,
            Err(e) => Err(ChalkboardError::Internal(format!(
                "failed to serialize display mode: {e}"
            ))),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to persist display mode");
        }
    }

    async fn load_history(&self) -> Conversation {
        match self.store.load(StateKey::ChatHistory).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                debug!(error = %e, "discarding unreadable chat history");
                Conversation::new()
            }),
            Ok(None) => Conversation::new(),
            Err(e) => {
                warn!(error = %e, "failed to load chat history");
                Conversation::new()
            }
        }
    }

    async fn load_display_mode(&self) -> DisplayMode {
        match self.store.load(StateKey::DisplayMode).await {
            Ok(Some(raw)) => parse_display_mode(&raw).unwrap_or_else(|| {
                debug!(value = %raw, "discarding unreadable display mode");
                DisplayMode::default()
            }),
            Ok(None) => DisplayMode::default(),
            Err(e) => {
                warn!(error = %e, "failed to load display mode");
                DisplayMode::default()
            }
        }
    }
}

/// Accepts `"light"`/`"dark"` as well as a bare `true`/`false` dark flag.
fn parse_display_mode(raw: &str) -> Option<DisplayMode> {
    if let Ok(mode) = serde_json::from_str::<DisplayMode>(raw) {
        return Some(mode);
    }
    match serde_json::from_str::<bool>(raw) {
        Ok(true) => Some(DisplayMode::Dark),
        Ok(false) => Some(DisplayMode::Light),
        Err(_) => None,
    }
}
