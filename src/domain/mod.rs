//! Domain layer for the taskrank engine
//!
//! This module contains the task model, strategies, errors and the scoring port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
