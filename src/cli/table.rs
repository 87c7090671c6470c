//! Table output formatting for CLI commands
//!
//! Ranked task and suggestion tables using comfy-table. Colors are dropped
//! when `NO_COLOR` is set or the terminal is dumb.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::output::truncate;
use crate::domain::models::{ScoreFlags, ScoredTask, Suggestion};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format ranked tasks, highest score first
    pub fn format_scored_tasks(&self, tasks: &[ScoredTask]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Flags").add_attribute(Attribute::Bold),
            Cell::new("Explanation").add_attribute(Attribute::Bold),
        ]);

        for (rank, scored) in tasks.iter().enumerate() {
            let title = scored.task.title_text();
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(scored.task.id.to_string()),
                Cell::new(truncate(title.as_deref().unwrap_or("-"), 40)),
                self.score_cell(scored.score),
                self.flags_cell(scored.flags),
                Cell::new(&scored.explanation),
            ]);
        }

        table.to_string()
    }

    /// Format the reduced suggestion view
    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Why").add_attribute(Attribute::Bold),
        ]);

        for suggestion in suggestions {
            let title = suggestion.title_text();
            table.add_row(vec![
                Cell::new(suggestion.id.to_string()),
                Cell::new(truncate(title.as_deref().unwrap_or("-"), 40)),
                self.score_cell(suggestion.score),
                Cell::new(&suggestion.why),
            ]);
        }

        table.to_string()
    }

    fn score_cell(&self, score: f64) -> Cell {
        let cell = Cell::new(format!("{score:.2}"));
        if !self.use_colors {
            return cell;
        }
        if score >= 100.0 {
            cell.fg(Color::Red).add_attribute(Attribute::Bold)
        } else if score < 0.0 {
            cell.fg(Color::DarkGrey)
        } else {
            cell
        }
    }

    fn flags_cell(&self, flags: ScoreFlags) -> Cell {
        let mut labels = Vec::new();
        if flags.overdue {
            labels.push("overdue");
        }
        if flags.has_dependencies {
            labels.push("deps");
        }
        if labels.is_empty() {
            return Cell::new("-");
        }

        let cell = Cell::new(labels.join(", "));
        if self.use_colors && flags.overdue {
            cell.fg(Color::Red)
        } else if self.use_colors {
            cell.fg(Color::Yellow)
        } else {
            cell
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
