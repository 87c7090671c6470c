use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{is_truthy, ScoreFlags, Strategy, TaskLookup, TaskRecord, TaskScore};
use crate::domain::ports::TaskScorer;
use crate::services::date_normalizer;

const DEFAULT_IMPORTANCE: i64 = 5;
const DEFAULT_HOURS: f64 = 1.0;

// -2^63 and 2^63; the upper bound itself does not fit in an i64
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Per-term contributions behind a task's score.
///
/// `total()` is the unclamped, unrounded sum in the order the terms are
/// applied: urgency, importance, effort, strategy, then the dependency penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub strategy: f64,
    pub dependency_penalty: f64,
    pub unresolved_dependencies: usize,
    pub reasons: Vec<String>,
    pub flags: ScoreFlags,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.strategy - self.dependency_penalty
    }
}

/// Service for calculating task priority scores
///
/// Score formula: urgency + importance*8 + effort + strategy adjustment
/// - unresolved_dependencies*30, floored at -1000 and rounded to 2 decimals.
#[derive(Debug, Clone)]
pub struct PriorityCalculator {
    dependency_penalty: f64,
    score_floor: f64,
}

impl Default for PriorityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityCalculator {
    /// Create a new priority calculator with default weights
    pub fn new() -> Self {
        Self {
            dependency_penalty: 30.0,
            score_floor: -1000.0,
        }
    }

    /// Create a priority calculator with a custom penalty and floor
    pub fn with_weights(dependency_penalty: f64, score_floor: f64) -> Self {
        Self {
            dependency_penalty,
            score_floor,
        }
    }

    /// Calculate the final score for a task
    ///
    /// # Arguments
    /// * `task` - The task to score
    /// * `lookup` - Batch snapshot for resolving dependencies, if any
    /// * `strategy` - Weighting policy
    /// * `today` - Reference date for urgency
    pub fn calculate(
        &self,
        task: &TaskRecord,
        lookup: Option<&TaskLookup<'_>>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<TaskScore> {
        let breakdown = self.breakdown(task, lookup, strategy, today)?;
        let score = round2(breakdown.total().max(self.score_floor));

        Ok(TaskScore {
            score,
            explanation: breakdown.reasons.join("; "),
            flags: breakdown.flags,
        })
    }

    /// Compute every scoring term without clamping or rounding
    pub fn breakdown(
        &self,
        task: &TaskRecord,
        lookup: Option<&TaskLookup<'_>>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<ScoreBreakdown> {
        let importance = coerce_importance(task)?;
        let hours = coerce_hours(task)?;
        let days_until = date_normalizer::normalize(task.due_date.as_ref())
            .date()
            .map(|due| (due - today).num_days());

        let mut reasons = Vec::new();
        let urgency = urgency_term(days_until, &mut reasons);

        let importance_term = importance as f64 * 8.0;
        reasons.push(format!("importance {importance}"));

        let effort = effort_term(hours, &mut reasons);
        let strategy_term = strategy_term(strategy, importance, hours, days_until, &mut reasons);

        let unresolved = count_unresolved(task, lookup);
        let dependency_penalty = unresolved as f64 * self.dependency_penalty;
        if unresolved > 0 {
            reasons.push(format!("{unresolved} unresolved dependency(ies)"));
        }

        Ok(ScoreBreakdown {
            urgency,
            importance: importance_term,
            effort,
            strategy: strategy_term,
            dependency_penalty,
            unresolved_dependencies: unresolved,
            reasons,
            flags: ScoreFlags {
                overdue: days_until.is_some_and(|d| d < 0),
                has_dependencies: task.has_dependencies(),
            },
        })
    }
}

impl TaskScorer for PriorityCalculator {
    fn score(
        &self,
        task: &TaskRecord,
        lookup: Option<&TaskLookup<'_>>,
        strategy: Strategy,
        today: NaiveDate,
    ) -> DomainResult<TaskScore> {
        self.calculate(task, lookup, strategy, today)
    }
}

fn urgency_term(days_until: Option<i64>, reasons: &mut Vec<String>) -> f64 {
    let Some(days) = days_until else {
        reasons.push("no due date".to_string());
        return 0.0;
    };

    if days < 0 {
        reasons.push("overdue".to_string());
        200.0
    } else if days <= 1 {
        reasons.push("due ≤ 1 day".to_string());
        80.0
    } else if days <= 3 {
        reasons.push("due ≤ 3 days".to_string());
        50.0
    } else {
        let value = 0.5f64.mul_add(-(days as f64), 20.0).max(0.0);
        if value > 0.0 {
            reasons.push(format!("due in {days} days"));
        }
        value
    }
}

fn effort_term(hours: f64, reasons: &mut Vec<String>) -> f64 {
    if hours <= 1.0 {
        reasons.push("quick win".to_string());
        20.0
    } else if hours <= 3.0 {
        reasons.push("small task".to_string());
        10.0
    } else {
        let penalty = (0.5 * (hours - 3.0)).max(0.0);
        if penalty > 0.0 {
            reasons.push(format!("big task ({}h)", format_hours(hours)));
        }
        -penalty
    }
}

fn strategy_term(
    strategy: Strategy,
    importance: i64,
    hours: f64,
    days_until: Option<i64>,
    reasons: &mut Vec<String>,
) -> f64 {
    match strategy {
        Strategy::FastestWins => {
            if hours <= 1.0 {
                reasons.push("strategy: fastest_wins quick boost".to_string());
                40.0
            } else if hours <= 3.0 {
                10.0
            } else {
                0.0
            }
        }
        Strategy::HighImpact => {
            reasons.push("strategy: high_impact".to_string());
            importance as f64 * 10.0
        }
        Strategy::DeadlineDriven => {
            reasons.push("strategy: deadline_driven".to_string());
            match days_until {
                Some(days) if days < 0 => 300.0,
                Some(days) => (2.0f64).mul_add(-(days as f64), 100.0).max(0.0),
                None => 0.0,
            }
        }
        Strategy::SmartBalance => {
            reasons.push("strategy: smart_balance".to_string());
            0.0
        }
    }
}

/// Dependencies missing from the lookup or not completed. Without a usable
/// lookup every declared dependency counts.
fn count_unresolved(task: &TaskRecord, lookup: Option<&TaskLookup<'_>>) -> usize {
    let deps = task.dependency_ids();
    match lookup {
        Some(lookup) if !lookup.is_empty() => deps
            .iter()
            .filter(|id| lookup.get(id).is_none_or(|dep| !dep.is_completed()))
            .count(),
        _ => deps.len(),
    }
}

/// Falsy values mean "unset"; reals truncate toward zero. Values outside the
/// `i64` range are rejected rather than saturated.
fn coerce_importance(task: &TaskRecord) -> DomainResult<i64> {
    let value = match &task.importance {
        Some(v) if is_truthy(v) => v,
        _ => return Ok(DEFAULT_IMPORTANCE),
    };

    let parsed = match value {
        Value::Bool(_) => Some(1),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::trunc)
                .filter(|t| (I64_LOWER..I64_UPPER).contains(t))
                .map(|t| t as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| invalid_field(task, "importance", value))
}

fn coerce_hours(task: &TaskRecord) -> DomainResult<f64> {
    let value = match &task.estimated_hours {
        Some(v) if is_truthy(v) => v,
        _ => return Ok(DEFAULT_HOURS),
    };

    let parsed = match value {
        Value::Bool(_) => Some(1.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| invalid_field(task, "estimated_hours", value))
}

fn invalid_field(task: &TaskRecord, field: &'static str, value: &Value) -> DomainError {
    DomainError::InvalidNumericField {
        task_id: task.id.to_string(),
        field,
        value: value.to_string(),
    }
}

/// Shortest round-trip form. Whole numbers keep one decimal place (`5.0`);
/// magnitudes of 1e16 and up, or below 1e-4, switch to `1e+16` notation.
fn format_hours(hours: f64) -> String {
    let magnitude = hours.abs();
    if hours.is_finite() && (magnitude >= 1e16 || (magnitude > 0.0 && magnitude < 1e-4)) {
        let formatted = format!("{hours:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => match exp.strip_prefix('-') {
                Some(digits) => format!("{mantissa}e-{digits:0>2}"),
                None => format!("{mantissa}e+{exp:0>2}"),
            },
            None => formatted,
        };
    }
    if hours.fract() == 0.0 {
        format!("{hours:.1}")
    } else {
        format!("{hours}")
    }
}

/// Two decimals; exact ties go to the even neighbour.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
