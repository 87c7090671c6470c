pub mod config;
pub mod lookup;
pub mod strategy;
pub mod task;

pub use config::{Config, LoggingConfig, ServerConfig};
pub use lookup::TaskLookup;
pub use strategy::Strategy;
pub use task::{
    is_truthy, title_text, DueDateInput, RawId, ScoreFlags, ScoredTask, Suggestion, TaskId, TaskRecord,
    TaskScore,
};
