// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./chalkboard.toml` > `~/.config/chalkboard/chalkboard.toml`
//! > `/etc/chalkboard/chalkboard.toml` with environment variable overrides via
//! the `CHALKBOARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ChalkboardConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/chalkboard/chalkboard.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "chalkboard.toml";

/// Path of the per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chalkboard").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/chalkboard/chalkboard.toml` (system-wide)
/// 3. `~/.config/chalkboard/chalkboard.toml` (user XDG config)
/// 4. `./chalkboard.toml` (local directory)
/// 5. `CHALKBOARD_*` environment variables
pub fn load_config() -> Result<ChalkboardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ChalkboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChalkboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ChalkboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChalkboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ChalkboardConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `CHALKBOARD_GEMINI_API_KEY` must map to `gemini.api_key`,
/// not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("CHALKBOARD_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CHALKBOARD_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("persona_", "persona.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
