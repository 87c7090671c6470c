//! Port trait definitions (Hexagonal Architecture)
//!
//! - TaskScorer: per-task priority scoring
//!
//! Outer surfaces depend on this trait rather than on a concrete scorer.

pub mod task_scorer;

pub use task_scorer::TaskScorer;
