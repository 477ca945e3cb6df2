//! Core error types for `BudgetBar`.

use thiserror::Error;

/// Core error type for `BudgetBar` operations.
///
/// The progress calculator and the bar view are total and never produce
/// this type; it surfaces when parsing configuration values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
