// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot subcommands and the wiring they share with the shell.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chalkboard_agent::Orchestrator;
use chalkboard_config::model::ChalkboardConfig;
use chalkboard_core::{
    AdapterType, ChalkboardError, Confirmer, GenerateRequest, GenerateResponse, HealthStatus,
    ModelAdapter, PluginAdapter, StateStore,
};
use chalkboard_persona::{Persona, build_prompt};
use chalkboard_storage::SqliteStore;
use tracing::{debug, warn};

use crate::confirm::TerminalConfirmer;
use crate::render;

/// Stands in for the model in commands that never submit a turn.
pub struct OfflineModel;

#[async_trait]
impl PluginAdapter for OfflineModel {
    fn name(&self) -> &str {
        "offline"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Model
    }

    async fn health_check(&self) -> Result<HealthStatus, ChalkboardError> {
        Ok(HealthStatus::Degraded("no model configured".into()))
    }

    async fn shutdown(&self) -> Result<(), ChalkboardError> {
        Ok(())
    }
}

#[async_trait]
impl ModelAdapter for OfflineModel {
    async fn generate(
        &self,
        _request: GenerateRequest,
    ) -> Result<GenerateResponse, ChalkboardError> {
        Err(ChalkboardError::Config(
            "this command does not talk to a model".into(),
        ))
    }
}

/// Confirms everything. Backs `clear --yes`.
struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Loads the configured persona, from file when one is set.
pub fn load_persona(config: &ChalkboardConfig) -> Result<Arc<Persona>, ChalkboardError> {
    let file = config.persona.file.as_deref().map(Path::new);
    let persona = Persona::load(config.persona.variant, file)?;
    debug!(persona = persona.name(), variant = %persona.variant, "persona loaded");
    Ok(Arc::new(persona))
}

/// A restored orchestrator plus the store it persists to.
pub struct Session {
    pub orchestrator: Orchestrator,
    pub store: Arc<SqliteStore>,
}

impl Session {
    /// Opens storage and restores the persisted chat.
    pub async fn open(
        config: &ChalkboardConfig,
        persona: Arc<Persona>,
        model: Arc<dyn ModelAdapter>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Result<Self, ChalkboardError> {
        let store = Arc::new(SqliteStore::open(&config.storage).await?);
        let orchestrator =
            Orchestrator::restore(persona, model, store.clone() as Arc<dyn StateStore>, confirmer)
                .await;
        Ok(Self {
            orchestrator,
            store,
        })
    }

    /// Flushes storage. Failures are logged, not returned.
    pub async fn close(self) {
        if let Err(e) = self.store.shutdown().await {
            warn!(error = %e, "storage shutdown failed");
        }
    }
}

/// `chalkboard prompt`: prints the composed prompt without calling the model.
pub fn run_prompt(config: &ChalkboardConfig, text: &str) -> Result<(), ChalkboardError> {
    let persona = load_persona(config)?;
    println!("{}", build_prompt(&persona, text));
    Ok(())
}

/// `chalkboard history`: renders the persisted conversation.
pub async fn run_history(config: &ChalkboardConfig) -> Result<(), ChalkboardError> {
    let persona = load_persona(config)?;
    let session = Session::open(
        config,
        persona.clone(),
        Arc::new(OfflineModel),
        Arc::new(TerminalConfirmer),
    )
    .await?;

    for line in render::render(&session.orchestrator.view(), &persona) {
        println!("{line}");
    }
    session.close().await;
    Ok(())
}

/// `chalkboard clear`: deletes the persisted conversation after confirmation.
pub async fn run_clear(config: &ChalkboardConfig, assume_yes: bool) -> Result<(), ChalkboardError> {
    let persona = load_persona(config)?;
    let confirmer: Arc<dyn Confirmer> = if assume_yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalConfirmer)
    };
    let mut session = Session::open(config, persona, Arc::new(OfflineModel), confirmer).await?;

    if session.orchestrator.clear().await {
        println!("Conversation cleared.");
    } else {
        println!("Conversation kept.");
    }
    session.close().await;
    Ok(())
}

/// `chalkboard theme`: flips and persists the display mode.
pub async fn run_theme(config: &ChalkboardConfig) -> Result<(), ChalkboardError> {
    let persona = load_persona(config)?;
    let mut session = Session::open(
        config,
        persona,
        Arc::new(OfflineModel),
        Arc::new(TerminalConfirmer),
    )
    .await?;

    let mode = session.orchestrator.toggle_display_mode().await;
    println!("Display mode: {mode}");
    session.close().await;
    Ok(())
}
