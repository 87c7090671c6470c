//! `taskrank analyze`

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
use crate::services::{format_cycle_path, local_today, AnalysisReport, TaskAnalysisService};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file with the task batch (stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Scoring strategy: smart_balance, fastest_wins, high_impact, deadline_driven
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(short, long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput(pub AnalysisReport);

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        let report = &self.0;
        if report.tasks.is_empty() {
            return "No tasks to analyze.".to_string();
        }

        let mut lines = vec![format!(
            "{} {} ({} tasks)",
            style("Strategy:").bold(),
            report.strategy,
            report.tasks.len()
        )];
        lines.push(TableFormatter::new().format_scored_tasks(&report.tasks));

        if !report.dependency_cycles.is_empty() {
            lines.push(format!(
                "{} {} dependency cycle(s):",
                style("warning:").yellow().bold(),
                report.dependency_cycles.len()
            ));
            for cycle in &report.dependency_cycles {
                lines.push(format!("  {}", format_cycle_path(cycle)));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

pub fn execute(args: AnalyzeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tasks = read_tasks(args.file.as_deref())?;
    let strategy = resolve_strategy(args.strategy.as_deref(), config);
    let today = args.today.unwrap_or_else(local_today);

    let report = TaskAnalysisService::default().analyze(tasks, strategy, today)?;
    output(&AnalyzeOutput(report), json_mode);
    Ok(())
}
