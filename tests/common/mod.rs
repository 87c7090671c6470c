//! Common test utilities for integration tests
//!
//! Shared fixtures and helpers used across multiple integration test files.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use taskrank::TaskRecord;

/// Fixed reference date so scores are reproducible
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
}

pub fn due_in(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Task with only an id and dependency list
pub fn task(id: &str, deps: &[&str]) -> TaskRecord {
    TaskRecord::new(id).with_dependencies(deps.iter().copied())
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
