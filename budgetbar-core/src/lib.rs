// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `BudgetBar` Core
//!
//! Core types and logic for budget category progress bars.
//!
//! This crate provides the pure parts of `BudgetBar`, used by the store and
//! the CLI:
//!
//! - Domain models (progress inputs/outputs, render model)
//! - The progress calculator and its two policies
//! - The bar view model and its capability traits
//! - Input-keyed memoization and a default currency formatter
//!
//! ## Key Types
//!
//! ### Calculation
//! - [`ProgressInput`] - Assigned, activity, balance, optional template
//! - [`ProgressOutput`] - Baseline, ratios, remaining, state
//! - [`ProgressState`] - Closed set of visual classifications
//! - [`ProgressPolicy`] - Simple (canonical) or template-aware
//! - [`compute`] - Canonical calculator entry point
//!
//! ### Rendering
//! - [`ProgressBarView`] - Derives [`BarRender`] from inputs and capabilities
//! - [`Segment`] / [`SegmentKind`] - Fill segments of a bar
//! - [`ColorTone`] - Fill tone resolved by a [`ColorTheme`]
//!
//! ### Capabilities
//! - [`FeatureFlags`], [`Preferences`], [`CurrencyFormatter`], [`ColorTheme`]
//!
//! ## Example
//!
//! ```
//! use budgetbar_core::{compute, ProgressInput, ProgressState};
//!
//! let out = compute(&ProgressInput::new(10_000, -12_000, -2_000));
//! assert_eq!(out.state, ProgressState::OverBudget);
//! assert_eq!(out.progress_ratio, 1.0);
//! ```

pub mod calculator;
pub mod error;
pub mod format;
pub mod memo;
pub mod models;
pub mod traits;
pub mod view;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Calculation
    ProgressInput,
    ProgressOutput,
    ProgressPolicy,
    ProgressState,
    // Rendering
    AmountKind,
    BarRender,
    ColorTone,
    Segment,
    SegmentKind,
};

pub use calculator::compute;
pub use format::FinancialFormatter;
pub use memo::ProgressMemo;
pub use traits::{
    ColorTheme, CurrencyFormatter, FeatureFlags, Preferences, PROGRESS_BARS_FLAG,
    SHOW_PROGRESS_BARS_PREF,
};
pub use view::{ProgressBarView, TOOLTIP_SEPARATOR};
