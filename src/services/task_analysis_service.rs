//! Batch analysis: cycle detection plus scoring and ranking of every task.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::instrument;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ScoredTask, Strategy, Suggestion, TaskId, TaskLookup, TaskRecord};
use crate::domain::ports::TaskScorer;
use crate::services::cycle_detector::{CycleDetector, CycleReport};
use crate::services::priority_calculator::PriorityCalculator;

/// Default number of tasks returned by [`TaskAnalysisService::suggest`].
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Current date on the host's local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Full batch analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Scored tasks, highest score first
    pub tasks: Vec<ScoredTask>,
    pub strategy: Strategy,
    pub dependency_cycles: Vec<Vec<TaskId>>,
}

/// Top-N suggestion result.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionReport {
    pub strategy: Strategy,
    #[serde(rename = "top_3")]
    pub suggestions: Vec<Suggestion>,
}

/// Orchestrates the engine over a whole batch.
///
/// The id lookup is built once per call and shared read-only by every scoring
/// call, so the service itself holds no per-batch state.
#[derive(Clone)]
pub struct TaskAnalysisService {
    scorer: Arc<dyn TaskScorer>,
    detector: CycleDetector,
    suggestion_limit: usize,
}

impl Default for TaskAnalysisService {
    fn default() -> Self {
        Self::new(Arc::new(PriorityCalculator::new()))
    }
}

impl TaskAnalysisService {
    pub fn new(scorer: Arc<dyn TaskScorer>) -> Self {
        Self {
            scorer,
            detector: CycleDetector::new(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    /// Score every task against the batch and sort by score, descending.
    ///
    /// Ties keep their input order. The first task whose numeric fields
    /// cannot be converted aborts the whole batch.
    pub fn score_all(
        &self,
        tasks: Vec<TaskRecord>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<Vec<ScoredTask>> {
        let scores = {
            let lookup = TaskLookup::new(&tasks);
            tasks
                .iter()
                .map(|task| self.scorer.score(task, Some(&lookup), strategy, today))
                .collect::<DomainResult<Vec<_>>>()?
        };

        let mut scored: Vec<ScoredTask> = tasks
            .into_iter()
            .zip(scores)
            .map(|(task, result)| ScoredTask::new(task, result))
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }

    pub fn detect_cycles(&self, tasks: &[TaskRecord]) -> CycleReport {
        self.detector.detect(tasks)
    }

    /// Batch analysis: ranked tasks plus every detected dependency cycle.
    #[instrument(level = "debug", skip_all, fields(task_count = tasks.len(), strategy = %strategy))]
    pub fn analyze(
        &self,
        tasks: Vec<TaskRecord>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<AnalysisReport> {
        let cycles = self.detect_cycles(&tasks);
        if cycles.has_cycle {
            tracing::info!(count = cycles.cycles.len(), "dependency cycles found");
        }

        let scored = self.score_all(tasks, strategy, today)?;
        tracing::debug!(top_score = ?scored.first().map(|t| t.score), "batch scored");

        Ok(AnalysisReport {
            tasks: scored,
            strategy,
            dependency_cycles: cycles.cycles,
        })
    }

    /// The highest-scoring tasks, reduced to `{id, title, score, why, flags}`.
    #[instrument(level = "debug", skip_all, fields(task_count = tasks.len(), strategy = %strategy))]
    pub fn suggest(
        &self,
        tasks: Vec<TaskRecord>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<SuggestionReport> {
        let scored = self.score_all(tasks, strategy, today)?;
        let suggestions = scored
            .iter()
            .take(self.suggestion_limit)
            .map(Suggestion::from)
            .collect();

        Ok(SuggestionReport {
            strategy,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use chrono::Duration;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_analyze_sorts_descending() {
        let tasks = vec![
            TaskRecord::new("low").with_importance(1).with_estimated_hours(10.0),
            TaskRecord::new("high")
                .with_importance(10)
                .with_due_date(today() - Duration::days(1)),
            TaskRecord::new("mid").with_importance(5),
        ];

        let report = TaskAnalysisService::default()
            .analyze(tasks, Strategy::SmartBalance, today())
            .unwrap();

        let order: Vec<String> = report.tasks.iter().map(|t| t.task.id.to_string()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
        assert!(report.dependency_cycles.is_empty());
        assert_eq!(report.strategy, Strategy::SmartBalance);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tasks = vec![TaskRecord::new("first"), TaskRecord::new("second")];
        let report = TaskAnalysisService::default()
            .analyze(tasks, Strategy::SmartBalance, today())
            .unwrap();
        assert_eq!(report.tasks[0].task.id, TaskId::from("first"));
        assert_eq!(report.tasks[1].task.id, TaskId::from("second"));
    }

    #[test]
    fn test_analyze_reports_cycles_and_penalties() {
        let tasks = vec![
            TaskRecord::new("a").with_dependencies(["b"]),
            TaskRecord::new("b").with_dependencies(["a"]),
        ];
        let report = TaskAnalysisService::default()
            .analyze(tasks, Strategy::SmartBalance, today())
            .unwrap();

        assert_eq!(report.dependency_cycles.len(), 1);
        assert!(report.tasks.iter().all(|t| t.score == 30.0));
    }

    #[test]
    fn test_completed_dependency_in_batch_is_resolved() {
        let tasks = vec![
            TaskRecord::new("base").with_completed(true),
            TaskRecord::new("next").with_dependencies(["base"]),
        ];
        let report = TaskAnalysisService::default()
            .analyze(tasks, Strategy::SmartBalance, today())
            .unwrap();
        let next = report
            .tasks
            .iter()
            .find(|t| t.task.id == TaskId::from("next"))
            .unwrap();
        assert_eq!(next.score, 60.0);
    }

    #[test]
    fn test_empty_batch() {
        let report = TaskAnalysisService::default()
            .analyze(vec![], Strategy::HighImpact, today())
            .unwrap();
        assert!(report.tasks.is_empty());
        assert!(report.dependency_cycles.is_empty());
    }

    #[test]
    fn test_invalid_field_aborts_batch() {
        let mut bad = TaskRecord::new("bad");
        bad.estimated_hours = Some(json!("lots"));
        let tasks = vec![TaskRecord::new("ok"), bad];

        let err = TaskAnalysisService::default()
            .analyze(tasks, Strategy::SmartBalance, today())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidNumericField { .. }));
    }

    #[test]
    fn test_suggest_limits_and_reduces() {
        let tasks: Vec<TaskRecord> = (1..=5)
            .map(|i| TaskRecord::new(i).with_title(format!("T{i}")).with_importance(i))
            .collect();

        let report = TaskAnalysisService::default()
            .suggest(tasks, Strategy::SmartBalance, today())
            .unwrap();

        assert_eq!(report.suggestions.len(), 3);
        let ids: Vec<TaskId> = report.suggestions.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![TaskId::Int(5), TaskId::Int(4), TaskId::Int(3)]);
        assert_eq!(report.suggestions[0].title_text().as_deref(), Some("T5"));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["strategy"], json!("smart_balance"));
        assert_eq!(value["top_3"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_custom_suggestion_limit() {
        let tasks: Vec<TaskRecord> = (1..=5_i64).map(TaskRecord::new).collect();
        let service = TaskAnalysisService::default().with_suggestion_limit(1);
        let report = service
            .suggest(tasks, Strategy::SmartBalance, today())
            .unwrap();
        assert_eq!(report.suggestions.len(), 1);
    }
}
