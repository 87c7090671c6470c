//! Scoring strategies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weighting policy applied on top of the base score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Base score only
    #[default]
    SmartBalance,
    /// Heavy boost for short tasks
    FastestWins,
    /// Extra importance weight
    HighImpact,
    /// Extra urgency weight
    DeadlineDriven,
}

impl Strategy {
    pub const ALL: [Self; 4] = [
        Self::SmartBalance,
        Self::FastestWins,
        Self::HighImpact,
        Self::DeadlineDriven,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmartBalance => "smart_balance",
            Self::FastestWins => "fastest_wins",
            Self::HighImpact => "high_impact",
            Self::DeadlineDriven => "deadline_driven",
        }
    }

    /// Strict lookup, `None` for unrecognized names.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "smart_balance" => Some(Self::SmartBalance),
            "fastest_wins" => Some(Self::FastestWins),
            "high_impact" => Some(Self::HighImpact),
            "deadline_driven" => Some(Self::DeadlineDriven),
            _ => None,
        }
    }

    /// Lenient lookup: anything unrecognized (or missing) is `SmartBalance`.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(s) => Self::from_str(s).unwrap_or_else(|| {
                tracing::debug!(strategy = s, "unknown strategy, using smart_balance");
                Self::SmartBalance
            }),
            None => Self::SmartBalance,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
