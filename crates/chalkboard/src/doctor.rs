// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chalkboard doctor` command implementation.
//!
//! Runs diagnostic checks against the configuration, the persona, the state
//! database and the Gemini API, and prints one line per check.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use chalkboard_config::model::ChalkboardConfig;
use chalkboard_core::{ChalkboardError, HealthStatus, PluginAdapter};
use chalkboard_gemini::GeminiProvider;
use chalkboard_storage::SqliteStore;

use crate::commands::load_persona;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `chalkboard doctor` command.
///
/// `config_path` is the explicit `--config` file, if one was given; the
/// configuration check re-reads that file instead of the default locations.
/// With `plain`, or when stdout is not a terminal, prints `[OK]`-style tags
/// instead of coloured symbols.
pub async fn run_doctor(
    config: &ChalkboardConfig,
    config_path: Option<&Path>,
    plain: bool,
) -> Result<(), ChalkboardError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config_path),
        check_persona(config),
        check_database(config).await,
        check_gemini(config).await,
    ];

    println!();
    println!("  chalkboard doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();
    println!("  {}", summary(&results));
    println!();

    Ok(())
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    use colored::Colorize;

    let duration_ms = result.duration.as_millis();
    if use_color {
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

fn summary(results: &[CheckResult]) -> String {
    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    match issues {
        0 => "All checks passed.".to_string(),
        1 => "1 issue found.".to_string(),
        n => format!("{n} issues found."),
    }
}

/// Check the configuration the process was started with loads without errors.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let loaded = match config_path {
        Some(path) => chalkboard_config::load_and_validate_path(path),
        None => chalkboard_config::load_and_validate(),
    };
    match loaded {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// Check the configured persona loads and validates.
fn check_persona(config: &ChalkboardConfig) -> CheckResult {
    let start = Instant::now();
    match load_persona(config) {
        Ok(persona) => CheckResult::new(
            "Persona",
            CheckStatus::Pass,
            format!("{} ({})", persona.name(), persona.variant),
            start,
        ),
        Err(e) => CheckResult::new("Persona", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Check the state database opens, migrates and answers a query.
async fn check_database(config: &ChalkboardConfig) -> CheckResult {
    let start = Instant::now();
    let db_path = &config.storage.database_path;

    if !Path::new(db_path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first run)"),
            start,
        );
    }

    let store = match SqliteStore::open(&config.storage).await {
        Ok(store) => store,
        Err(e) => {
            return CheckResult::new(
                "Database",
                CheckStatus::Fail,
                format!("open failed: {e}"),
                start,
            );
        }
    };

    let result = match store.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("Database", CheckStatus::Pass, "connected", start)
        }
        Ok(HealthStatus::Degraded(msg)) => {
            CheckResult::new("Database", CheckStatus::Warn, msg, start)
        }
        Ok(HealthStatus::Unhealthy(msg)) => {
            CheckResult::new("Database", CheckStatus::Fail, msg, start)
        }
        Err(e) => CheckResult::new(
            "Database",
            CheckStatus::Fail,
            format!("query failed: {e}"),
            start,
        ),
    };
    let _ = store.shutdown().await;
    result
}

/// Check the Gemini API key is present and accepted.
async fn check_gemini(config: &ChalkboardConfig) -> CheckResult {
    let start = Instant::now();

    if config.gemini.resolve_api_key().is_none() {
        return CheckResult::new(
            "Gemini API",
            CheckStatus::Warn,
            "no API key configured",
            start,
        );
    }

    let provider = match GeminiProvider::new(&config.gemini) {
        Ok(p) => p,
        Err(e) => return CheckResult::new("Gemini API", CheckStatus::Fail, e.to_string(), start),
    };

    match provider.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(
            "Gemini API",
            CheckStatus::Pass,
            format!("{} reachable", config.gemini.model),
            start,
        ),
        Ok(HealthStatus::Degraded(msg)) => {
            CheckResult::new("Gemini API", CheckStatus::Warn, msg, start)
        }
        Ok(HealthStatus::Unhealthy(msg)) => {
            CheckResult::new("Gemini API", CheckStatus::Fail, msg, start)
        }
        Err(e) => CheckResult::new("Gemini API", CheckStatus::Fail, e.to_string(), start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkboard_config::model::{GeminiConfig, StorageConfig};
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn check(status: CheckStatus) -> CheckResult {
        CheckResult {
            name: "Test".into(),
            status,
            message: "msg".into(),
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn plain_output_uses_tags() {
        let line = format_result(&check(CheckStatus::Warn), false);
        assert!(line.contains("[WARN]"));
        assert!(line.contains("Test"));
        assert!(line.ends_with("msg (3ms)"));
    }

    #[test]
    fn summary_counts_warnings_and_failures() {
        assert_eq!(summary(&[check(CheckStatus::Pass)]), "All checks passed.");
        assert_eq!(
            summary(&[check(CheckStatus::Pass), check(CheckStatus::Fail)]),
            "1 issue found."
        );
        assert_eq!(
            summary(&[check(CheckStatus::Warn), check(CheckStatus::Fail)]),
            "2 issues found."
        );
    }

    #[test]
    fn persona_check_names_the_teacher() {
        let result = check_persona(&ChalkboardConfig::default());
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.contains("Ms. Harper"));
    }

    #[test]
    fn config_check_reads_explicit_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[persona]\nvariant = \"harsh\"\n").unwrap();
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[persona]\nvariant = \"grumpy\"\n").unwrap();

        let result = check_config(Some(&good));
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);

        let result = check_config(Some(&bad));
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn config_check_reports_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let result = check_config(Some(&dir.path().join("absent.toml")));
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[tokio::test]
    async fn missing_database_warns() {
        let dir = tempdir().unwrap();
        let config = ChalkboardConfig {
            storage: StorageConfig {
                database_path: dir.path().join("absent.db").to_string_lossy().into_owned(),
                wal_mode: true,
            },
            ..ChalkboardConfig::default()
        };
        let result = check_database(&config).await;
        assert_eq!(result.status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn existing_database_passes() {
        let dir = tempdir().unwrap();
        let config = ChalkboardConfig {
            storage: StorageConfig {
                database_path: dir.path().join("state.db").to_string_lossy().into_owned(),
                wal_mode: true,
            },
            ..ChalkboardConfig::default()
        };
        SqliteStore::open(&config.storage).await.unwrap();

        let result = check_database(&config).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
    }

    #[tokio::test]
    async fn gemini_check_reports_rejected_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models/gemini-1.5-flash"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let config = ChalkboardConfig {
            gemini: GeminiConfig {
                api_key: Some("bad-key".into()),
                base_url: server.uri(),
                ..GeminiConfig::default()
            },
            ..ChalkboardConfig::default()
        };
        let result = check_gemini(&config).await;
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.message.contains("API key not valid"), "{}", result.message);
    }

    #[tokio::test]
    async fn gemini_check_passes_when_model_is_reachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models/gemini-1.5-flash"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "models/gemini-1.5-flash"})),
            )
            .mount(&server)
            .await;

        let config = ChalkboardConfig {
            gemini: GeminiConfig {
                api_key: Some("good-key".into()),
                base_url: server.uri(),
                ..GeminiConfig::default()
            },
            ..ChalkboardConfig::default()
        };
        let result = check_gemini(&config).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
    }
}
