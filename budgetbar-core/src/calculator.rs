//! Category progress calculation.
//!
//! Maps a [`ProgressInput`] to a classified [`ProgressOutput`]. Every input,
//! including negative, zero, or extreme values, yields a finite result.
//! Negative `assigned` is treated as zero and overflow is never capped here;
//! renderers decide how much of it to show.

use crate::models::{ProgressInput, ProgressOutput, ProgressPolicy, ProgressState};

/// Computes progress with the canonical [`ProgressPolicy::Simple`] policy.
pub fn compute(input: &ProgressInput) -> ProgressOutput {
    ProgressPolicy::default().compute(input)
}

impl ProgressPolicy {
    /// Computes progress for `input` under this policy.
    pub fn compute(self, input: &ProgressInput) -> ProgressOutput {
        match self {
            ProgressPolicy::Simple => compute_simple(input),
            ProgressPolicy::TemplateAware => compute_template_aware(input),
        }
    }
}

fn compute_simple(input: &ProgressInput) -> ProgressOutput {
    let spent = input.spent();
    let assigned = non_negative(input.assigned);

    if assigned == 0 {
        return if spent == 0 {
            empty(ProgressState::WithinBudget, input.balance, None)
        } else {
            unbudgeted_spending(spent, input.balance, None)
        };
    }

    if spent > assigned {
        return over_budget(assigned, spent, input.balance, None);
    }

    ProgressOutput {
        baseline_amount: assigned,
        progress_ratio: ratio(spent, assigned),
        budgeted_ratio: None,
        overflow_ratio: 0.0,
        remaining: input.balance,
        state: ProgressState::WithinBudget,
    }
}

fn compute_template_aware(input: &ProgressInput) -> ProgressOutput {
    let spent = input.spent();
    let assigned = non_negative(input.assigned);
    let template = input.effective_template();

    let budgeted = match template {
        Some(target) => ratio(assigned, target).min(1.0),
        None => 1.0,
    };

    if assigned == 0 {
        return if spent == 0 {
            empty(ProgressState::Neutral, input.balance, Some(budgeted))
        } else {
            unbudgeted_spending(spent, input.balance, Some(budgeted))
        };
    }

    if spent > assigned {
        return over_budget(assigned, spent, input.balance, Some(budgeted));
    }

    let state = if template.is_some_and(|target| assigned < target) {
        ProgressState::Underfunded
    } else {
        ProgressState::Funded
    };

    ProgressOutput {
        baseline_amount: template.unwrap_or(assigned),
        progress_ratio: ratio(spent, assigned).min(1.0) * budgeted,
        budgeted_ratio: Some(budgeted),
        overflow_ratio: 0.0,
        remaining: input.balance,
        state,
    }
}

/// Nothing assigned, nothing spent.
fn empty(state: ProgressState, remaining: i64, budgeted_ratio: Option<f64>) -> ProgressOutput {
    ProgressOutput {
        baseline_amount: 0,
        progress_ratio: 0.0,
        budgeted_ratio,
        overflow_ratio: 0.0,
        remaining,
        state,
    }
}

/// Spending with nothing assigned: the spent amount becomes the baseline so
/// the bar has something to draw, and the row is immediately over budget.
fn unbudgeted_spending(spent: u64, remaining: i64, budgeted_ratio: Option<f64>) -> ProgressOutput {
    ProgressOutput {
        baseline_amount: spent,
        progress_ratio: 1.0,
        budgeted_ratio,
        overflow_ratio: 0.0,
        remaining,
        state: ProgressState::OverBudget,
    }
}

fn over_budget(
    assigned: u64,
    spent: u64,
    remaining: i64,
    budgeted_ratio: Option<f64>,
) -> ProgressOutput {
    ProgressOutput {
        baseline_amount: assigned,
        progress_ratio: 1.0,
        budgeted_ratio,
        overflow_ratio: ratio(spent - assigned, assigned),
        remaining,
        state: ProgressState::OverBudget,
    }
}

fn non_negative(amount: i64) -> u64 {
    u64::try_from(amount).unwrap_or(0)
}

/// `numerator / denominator`; callers guarantee a non-zero denominator.
#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator as f64
}

// ============================================================================
// Tests
// ============================================================================
