//! `taskrank cycles`

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use super::read_tasks;
use crate::cli::output::{output, CommandOutput};
use crate::services::{format_cycle_path, CycleDetector, CycleReport};

#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// JSON file with the task batch (stdin when omitted or "-")
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CyclesOutput(pub CycleReport);

impl CommandOutput for CyclesOutput {
    fn to_human(&self) -> String {
        let report = &self.0;
        if !report.has_cycle {
            return format!("{} no dependency cycles", style("ok:").green().bold());
        }

        let mut lines = vec![format!(
            "{} {} dependency cycle(s):",
            style("found").red().bold(),
            report.cycles.len()
        )];
        for cycle in &report.cycles {
            lines.push(format!("  {}", format_cycle_path(cycle)));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or_default()
    }
}

pub fn execute(args: CyclesArgs, json_mode: bool) -> Result<()> {
    let tasks = read_tasks(args.file.as_deref())?;
    let report = CycleDetector::new().detect(&tasks);
    output(&CyclesOutput(report), json_mode);
    Ok(())
}
