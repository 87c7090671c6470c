//! taskrank - task prioritization engine
//!
//! Scores a batch of loosely typed task records by urgency, importance,
//! effort and dependency state under a selectable strategy, ranks them, and
//! reports circular dependencies.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): task model, strategies, errors, ports
//! - **Service Layer** (`services`): date normalization, scoring, cycle detection, batch analysis
//! - **Adapters** (`adapters`): JSON payload decoding and the HTTP service
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use taskrank::{Strategy, TaskAnalysisService, TaskRecord};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let tasks = vec![
//!     TaskRecord::new("a").with_importance(8),
//!     TaskRecord::new("b").with_importance(2),
//! ];
//! let report = TaskAnalysisService::default()
//!     .analyze(tasks, Strategy::SmartBalance, today)
//!     .unwrap();
//! assert_eq!(report.tasks[0].task.id.to_string(), "a");
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, ScoreFlags, ScoredTask, Strategy, Suggestion, TaskId, TaskLookup, TaskRecord,
    TaskScore,
};
pub use domain::ports::TaskScorer;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    AnalysisReport, CycleDetector, CycleReport, PriorityCalculator, SuggestionReport,
    TaskAnalysisService,
};
