//! darkroster - line-oriented runner over one in-memory character sheet.
//!
//! Reads commands from stdin:
//!
//! - `token=value` applies a stat change (`Strength=3`, `Allies(Police)=+1`, `Allies=`)
//! - `:sheet` prints the sheet as nested JSON
//! - `:import <path>` replaces the sheet with a repaired legacy sheet
//! - `:recompute` recomputes every derived value
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use darkroster_domain::{CharacterSheet, SheetExport};
use darkroster_engine::{App, EngineConfig};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root so the runner works from `crates/engine` too.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "darkroster_engine=debug,darkroster_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = EngineConfig::from_env()?;
    let app = App::from_config(&config)?;
    tracing::info!(
        catalog = config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".into()),
        "Starting darkroster runner"
    );

    let mut sheet = CharacterSheet::new();
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let reply = run_command(&app, &mut sheet, line)?;
        writeln!(out, "{}", reply).context("writing stdout")?;
    }

    Ok(())
}

fn run_command(app: &App, sheet: &mut CharacterSheet, line: &str) -> anyhow::Result<String> {
    if line == ":sheet" {
        return serde_json::to_string_pretty(&SheetExport::from(&*sheet))
            .context("serializing sheet");
    }
    if line == ":recompute" {
        let updates = app.use_cases.stat_change.registry().recompute_all(sheet);
        return Ok(format!("OK: {} derived value(s) updated.", updates.len()));
    }
    if let Some(path) = line.strip_prefix(":import") {
        return import(app, sheet, path.trim());
    }

    let Some((token, value)) = line.split_once('=') else {
        return Ok(format!(
            "ERROR: expected token=value, :sheet, :import <path> or :recompute, got '{}'",
            line
        ));
    };
    let outcome = app.use_cases.stat_change.apply(sheet, token, value);
    let status = if outcome.is_ok() { "OK" } else { "ERROR" };
    Ok(format!("{}: {}", status, outcome.message))
}

fn import(app: &App, sheet: &mut CharacterSheet, path: &str) -> anyhow::Result<String> {
    if path.is_empty() {
        return Ok("ERROR: :import needs a file path".to_string());
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Ok(format!("ERROR: cannot read {}: {}", path, e)),
    };
    let document: serde_json::Value = match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => return Ok(format!("ERROR: {} is not valid JSON: {}", path, e)),
    };
    match app.use_cases.repair.import(&document) {
        Ok((repaired, report)) => {
            *sheet = repaired;
            Ok(format!(
                "OK: imported {}, relocated {}, dropped {}.",
                report.imported,
                report.relocated.len(),
                report.dropped.len()
            ))
        }
        Err(e) => Ok(format!("ERROR: {}", e)),
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
