//! Subcommand implementations.
//!
//! Every analysis command reads a JSON task payload from a file, or from
//! stdin when no file (or `-`) is given.

pub mod analyze;
pub mod cycles;
pub mod serve;
pub mod suggest;

pub use analyze::AnalyzeArgs;
pub use cycles::CyclesArgs;
pub use serve::ServeArgs;
pub use suggest::SuggestArgs;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use crate::adapters::payload::parse_task_payload_str;
use crate::domain::models::{Config, Strategy, TaskRecord};

/// Read and decode a task payload.
pub fn read_tasks(file: Option<&Path>) -> Result<Vec<TaskRecord>> {
    let body = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read task file {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read tasks from stdin")?;
            buf
        }
    };

    Ok(parse_task_payload_str(&body)?)
}

/// Strategy named on the command line, else the configured default.
pub fn resolve_strategy(requested: Option<&str>, config: &Config) -> Strategy {
    Strategy::from_name(Some(requested.unwrap_or(config.default_strategy.as_str())))
}

/// clap value parser for `--today`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}
