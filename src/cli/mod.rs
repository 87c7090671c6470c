//! Command-line interface for taskrank.

pub mod commands;
pub mod output;
pub mod table;
pub mod types;

pub use types::{Cli, Commands};

use console::style;

use crate::domain::errors::DomainError;

/// Report a command failure on stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let code = err
            .downcast_ref::<DomainError>()
            .map_or("ERROR", DomainError::code);
        let body = serde_json::json!({
            "error": format!("{err:#}"),
            "code": code,
        });
        eprintln!("{body}");
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    std::process::exit(1)
}
