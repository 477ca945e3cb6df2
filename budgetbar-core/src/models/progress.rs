//! Progress-related types.
//!
//! This module contains the records exchanged with the calculator:
//! - [`ProgressInput`] - Monetary inputs for one category row
//! - [`ProgressOutput`] - Ratios and classification for rendering
//! - [`ProgressState`] - Closed set of visual classifications
//! - [`ProgressPolicy`] - Which calculation policy to apply

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Input
// ============================================================================

/// Monetary inputs for a single category, in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInput {
    /// Budgeted amount for the period.
    pub assigned: i64,
    /// Money moved in the period. Negative means spent.
    pub activity: i64,
    /// Leftover after activity, possibly adjusted by carryover.
    pub balance: i64,
    /// Target amount. `None` or zero means no target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<u64>,
}

impl ProgressInput {
    /// Creates an input without a template.
    pub fn new(assigned: i64, activity: i64, balance: i64) -> Self {
        Self {
            assigned,
            activity,
            balance,
            template: None,
        }
    }

    /// Sets the template amount.
    #[must_use]
    pub fn with_template(mut self, template: u64) -> Self {
        self.template = Some(template);
        self
    }

    /// Returns the spent magnitude, `|activity|`.
    pub fn spent(&self) -> u64 {
        self.activity.unsigned_abs()
    }

    /// Returns the template amount when one is set and non-zero.
    pub fn effective_template(&self) -> Option<u64> {
        self.template.filter(|t| *t > 0)
    }
}

// ============================================================================
// Output
// ============================================================================

/// Visual classification of a category's funding state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressState {
    /// Spending within the assigned amount.
    WithinBudget,
    /// Spending beyond the assigned amount, or any spending with nothing assigned.
    OverBudget,
    /// Assigned covers the template (or there is no template).
    Funded,
    /// Assigned falls short of the template.
    Underfunded,
    /// Nothing assigned and nothing spent.
    Neutral,
}

impl ProgressState {
    /// Returns the stable tag for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressState::WithinBudget => "within-budget",
            ProgressState::OverBudget => "over-budget",
            ProgressState::Funded => "funded",
            ProgressState::Underfunded => "underfunded",
            ProgressState::Neutral => "neutral",
        }
    }

    /// Returns true if this state signals overspending.
    pub fn is_over(&self) -> bool {
        matches!(self, ProgressState::OverBudget)
    }
}

impl std::fmt::Display for ProgressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ratios and classification derived from a [`ProgressInput`].
///
/// Invariants upheld by every calculator policy:
/// - `progress_ratio` is in `[0, 1]`
/// - `overflow_ratio >= 0`, and `overflow_ratio > 0` implies `progress_ratio == 1`
/// - `baseline_amount == 0` implies both ratios are zero
/// - all floats are finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOutput {
    /// Amount representing 100% of the bar width.
    pub baseline_amount: u64,
    /// Fraction of the baseline filled by spending.
    pub progress_ratio: f64,
    /// Fraction of the template covered by the assigned amount.
    /// Only reported by the template-aware policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_ratio: Option<f64>,
    /// Spending beyond the baseline, relative to the baseline.
    pub overflow_ratio: f64,
    /// Pass-through of the input balance.
    pub remaining: i64,
    /// Visual classification.
    pub state: ProgressState,
}

impl ProgressOutput {
    /// Returns true if there is a baseline to draw against.
    pub fn has_baseline(&self) -> bool {
        self.baseline_amount > 0
    }

    /// Returns true if spending exceeded the baseline.
    pub fn has_overflow(&self) -> bool {
        self.overflow_ratio > 0.0
    }

    /// Total filled fraction including overflow. May exceed 1.
    pub fn total_ratio(&self) -> f64 {
        self.progress_ratio + self.overflow_ratio
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Calculation policy.
///
/// Exactly one policy is applied per computation. [`ProgressPolicy::Simple`]
/// is the canonical default; [`ProgressPolicy::TemplateAware`] must be
/// selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Two-state policy: within budget or over budget.
    #[default]
    Simple,
    /// Template-aware policy: funded, underfunded, over budget, or neutral.
    #[serde(alias = "template")]
    TemplateAware,
}

impl ProgressPolicy {
    /// All available policies.
    pub fn all() -> &'static [ProgressPolicy] {
        &[ProgressPolicy::Simple, ProgressPolicy::TemplateAware]
    }
}

impl std::fmt::Display for ProgressPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressPolicy::Simple => write!(f, "simple"),
            ProgressPolicy::TemplateAware => write!(f, "template"),
        }
    }
}

impl FromStr for ProgressPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(ProgressPolicy::Simple),
            "template" | "template_aware" | "template-aware" => Ok(ProgressPolicy::TemplateAware),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown progress policy '{other}' (expected simple or template)"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spent_uses_magnitude() {
        assert_eq!(ProgressInput::new(0, -3000, 0).spent(), 3000);
        assert_eq!(ProgressInput::new(0, 3000, 0).spent(), 3000);
        assert_eq!(
            ProgressInput::new(0, i64::MIN, 0).spent(),
            9_223_372_036_854_775_808
        );
    }

    #[test]
    fn test_effective_template() {
        assert_eq!(ProgressInput::new(1, 0, 0).effective_template(), None);
        assert_eq!(
            ProgressInput::new(1, 0, 0).with_template(0).effective_template(),
            None
        );
        assert_eq!(
            ProgressInput::new(1, 0, 0).with_template(500).effective_template(),
            Some(500)
        );
    }

    #[test]
    fn test_input_deserialize_camel_case_without_template() {
        let input: ProgressInput =
            serde_json::from_str(r#"{"assigned":10000,"activity":-3000,"balance":7000}"#).unwrap();
        assert_eq!(input, ProgressInput::new(10000, -3000, 7000));
    }

    #[test]
    fn test_state_serializes_kebab_case() {
        let json = serde_json::to_string(&ProgressState::WithinBudget).unwrap();
        assert_eq!(json, r#""within-budget""#);
        let json = serde_json::to_string(&ProgressState::OverBudget).unwrap();
        assert_eq!(json, r#""over-budget""#);
        assert_eq!(ProgressState::Underfunded.to_string(), "underfunded");
    }

    #[test]
    fn test_only_over_budget_is_over() {
        assert!(ProgressState::OverBudget.is_over());
        for state in [
            ProgressState::WithinBudget,
            ProgressState::Funded,
            ProgressState::Underfunded,
            ProgressState::Neutral,
        ] {
            assert!(!state.is_over(), "{state}");
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("simple".parse::<ProgressPolicy>().unwrap(), ProgressPolicy::Simple);
        assert_eq!(
            "Template".parse::<ProgressPolicy>().unwrap(),
            ProgressPolicy::TemplateAware
        );
        assert!("goal".parse::<ProgressPolicy>().is_err());
    }

    #[test]
    fn test_policy_deserialize_alias() {
        let policy: ProgressPolicy = serde_json::from_str(r#""template""#).unwrap();
        assert_eq!(policy, ProgressPolicy::TemplateAware);
        assert_eq!(ProgressPolicy::default(), ProgressPolicy::Simple);
    }
}
