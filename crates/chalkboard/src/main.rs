// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chalkboard - a terminal classroom with an AI teacher.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod confirm;
mod doctor;
mod render;
mod shell;

use std::path::{Path, PathBuf};

use chalkboard_config::model::ChalkboardConfig;
use chalkboard_core::{ChalkboardError, PersonaVariant};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Chalkboard - a terminal classroom with an AI teacher.
#[derive(Parser, Debug)]
#[command(name = "chalkboard", version, about, long_about = None)]
struct Cli {
    /// Teacher persona to use (supportive or harsh). Overrides the config file.
    #[arg(long, global = true)]
    persona: Option<PersonaVariant>,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat (the default).
    Chat,
    /// Print the saved conversation.
    History,
    /// Delete the saved conversation.
    Clear {
        /// Skip the confirmation question.
        #[arg(long)]
        yes: bool,
    },
    /// Switch between light and dark mode.
    Theme,
    /// Print the prompt that would be sent for TEXT, without sending it.
    Prompt {
        /// The student's message.
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Check configuration, persona, storage and API access.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => chalkboard_config::load_and_validate_path(path),
        None => chalkboard_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            chalkboard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    apply_cli_overrides(&mut config, &cli);

    init_tracing(&config.agent.log_level);

    let command = cli.command.unwrap_or(Commands::Chat);
    if let Err(e) = run(command, &config, cli.config.as_deref()).await {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    config: &ChalkboardConfig,
    config_path: Option<&Path>,
) -> Result<(), ChalkboardError> {
    match command {
        Commands::Chat => shell::run_shell(config).await,
        Commands::History => commands::run_history(config).await,
        Commands::Clear { yes } => commands::run_clear(config, yes).await,
        Commands::Theme => commands::run_theme(config).await,
        Commands::Prompt { text } => commands::run_prompt(config, &text.join(" ")),
        Commands::Doctor { plain } => doctor::run_doctor(config, config_path, plain).await,
    }
}

/// A `--persona` flag selects a built-in variant and drops any persona file.
fn apply_cli_overrides(config: &mut ChalkboardConfig, cli: &Cli) {
    if let Some(variant) = cli.persona {
        config.persona.variant = variant;
        config.persona.file = None;
    }
}

/// Logs go to stderr so they never interleave with the chat on stdout.
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chalkboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
