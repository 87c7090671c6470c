use chrono::NaiveDate;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Strategy, TaskLookup, TaskRecord, TaskScore};

/// Port for task priority scoring following hexagonal architecture
///
/// Scoring is pure: the same task, lookup, strategy and reference date
/// always produce the same result. Implementations must not keep state
/// between calls, so one scorer can serve every task of a batch.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use taskrank::domain::models::{Strategy, TaskRecord};
/// use taskrank::domain::ports::TaskScorer;
/// use taskrank::services::PriorityCalculator;
///
/// let scorer = PriorityCalculator::new();
/// let task = TaskRecord::new("t1").with_importance(7);
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let result = scorer.score(&task, None, Strategy::HighImpact, today).unwrap();
/// println!("{} ({})", result.score, result.explanation);
/// ```
pub trait TaskScorer: Send + Sync {
    /// Score one task.
    ///
    /// # Arguments
    ///
    /// * `task` - The task to score
    /// * `lookup` - Batch snapshot used to resolve dependencies; `None` treats
    ///   every declared dependency as unresolved
    /// * `strategy` - Weighting policy
    /// * `today` - Reference date for urgency
    ///
    /// # Returns
    ///
    /// * `Ok(TaskScore)` - Score, explanation and flags
    /// * `Err(DomainError::InvalidNumericField)` - If importance or hours are not numeric
    fn score(
        &self,
        task: &TaskRecord,
        lookup: Option<&TaskLookup<'_>>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<TaskScore>;
}
