//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{AnalyzeArgs, CyclesArgs, ServeArgs, SuggestArgs};

#[derive(Parser, Debug)]
#[command(name = "taskrank")]
#[command(about = "taskrank - score, rank and sanity-check task batches", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .taskrank/
    #[arg(short, long, global = true, env = "TASKRANK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every task and print them ranked
    Analyze(AnalyzeArgs),

    /// Print the highest-priority tasks with a short reason
    Suggest(SuggestArgs),

    /// Report dependency cycles only
    Cycles(CyclesArgs),

    /// Run the HTTP service
    Serve(ServeArgs),
}
