//! `taskrank suggest`

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use super::{parse_date, read_tasks, resolve_strategy};
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::TableFormatter;
use crate::domain::models::Config;
use crate::services::{local_today, SuggestionReport, TaskAnalysisService};

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// JSON file with the task batch (stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Scoring strategy: smart_balance, fastest_wins, high_impact, deadline_driven
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(short, long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Number of suggestions, overrides the configured limit
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SuggestOutput(pub SuggestionReport);

impl CommandOutput for SuggestOutput {
    fn to_human(&self) -> String {
        let report = &self.0;
        if report.suggestions.is_empty() {
            return "Nothing to suggest.".to_string();
        }

        format!(
            "{} {}\n{}",
            style("Suggested next tasks, strategy").bold(),
            report.strategy,
            TableFormatter::new().format_suggestions(&report.suggestions)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

pub fn execute(args: SuggestArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tasks = read_tasks(args.file.as_deref())?;
    let strategy = resolve_strategy(args.strategy.as_deref(), config);
    let today = args.today.unwrap_or_else(local_today);
    let limit = args.limit.map_or(config.suggestion_limit, |n| n as usize);

    let report = TaskAnalysisService::default()
        .with_suggestion_limit(limit)
        .suggest(tasks, strategy, today)?;
    output(&SuggestOutput(report), json_mode);
    Ok(())
}
