//! Service layer: the scoring and analysis engine.

pub mod cycle_detector;
pub mod date_normalizer;
pub mod priority_calculator;
pub mod task_analysis_service;

pub use cycle_detector::{format_cycle_path, CycleDetector, CycleReport};
pub use date_normalizer::{normalize, normalize_str, NormalizedDate};
pub use priority_calculator::{PriorityCalculator, ScoreBreakdown};
pub use task_analysis_service::{
    local_today, AnalysisReport, SuggestionReport, TaskAnalysisService, DEFAULT_SUGGESTION_LIMIT,
};
