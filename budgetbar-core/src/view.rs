//! Progress bar view model.
//!
//! [`ProgressBarView`] turns a [`ProgressInput`] into a [`BarRender`]: fill
//! tone, tooltip text and the segments to draw. Rendering itself belongs to
//! whatever toolkit consumes the render model.

use crate::models::{
    AmountKind, BarRender, ColorTone, ProgressInput, ProgressOutput, ProgressPolicy, Segment,
    SegmentKind,
};
use crate::traits::{
    CurrencyFormatter, FeatureFlags, Preferences, PROGRESS_BARS_FLAG, SHOW_PROGRESS_BARS_PREF,
};

/// Separator placed between tooltip fields.
pub const TOOLTIP_SEPARATOR: &str = " • ";

/// Derives bar render models from category inputs.
///
/// All collaborators are borrowed explicitly; the view holds no state of its
/// own beyond the selected [`ProgressPolicy`].
pub struct ProgressBarView<'a> {
    flags: &'a dyn FeatureFlags,
    preferences: &'a dyn Preferences,
    formatter: &'a dyn CurrencyFormatter,
    policy: ProgressPolicy,
}

impl<'a> ProgressBarView<'a> {
    /// Creates a view using the canonical calculation policy.
    pub fn new(
        flags: &'a dyn FeatureFlags,
        preferences: &'a dyn Preferences,
        formatter: &'a dyn CurrencyFormatter,
    ) -> Self {
        Self {
            flags,
            preferences,
            formatter,
            policy: ProgressPolicy::default(),
        }
    }

    /// Selects the calculation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ProgressPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the calculation policy in use.
    pub fn policy(&self) -> ProgressPolicy {
        self.policy
    }

    /// Returns true if the feature is enabled and the user wants bars shown.
    ///
    /// An unset preference counts as "don't show".
    pub fn is_enabled(&self) -> bool {
        self.flags.is_enabled(PROGRESS_BARS_FLAG)
            && self
                .preferences
                .global_preference(SHOW_PROGRESS_BARS_PREF)
                .unwrap_or(false)
    }

    /// Computes and renders a bar, or `None` when nothing should be drawn.
    pub fn render(&self, input: &ProgressInput) -> Option<BarRender> {
        if !self.is_enabled() {
            return None;
        }
        self.render_progress(input, self.policy.compute(input))
    }

    /// Renders an already computed output, e.g. one served from a
    /// [`ProgressMemo`](crate::ProgressMemo).
    pub fn render_progress(
        &self,
        input: &ProgressInput,
        progress: ProgressOutput,
    ) -> Option<BarRender> {
        if !self.is_enabled() || !progress.has_baseline() {
            return None;
        }

        Some(BarRender {
            tone: ColorTone::from(progress.state),
            percent: percent(&progress),
            tooltip: tooltip(input, &progress, self.formatter),
            segments: segments(&progress),
            progress,
        })
    }
}

/// Percent of the baseline spent, overflow included. Not capped at 100.
///
/// Saturates at `u64::MAX` for overflow ratios beyond the integer range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn percent(progress: &ProgressOutput) -> u64 {
    let scaled = (progress.total_ratio() * 100.0).round();
    if scaled >= u64::MAX as f64 {
        u64::MAX
    } else {
        scaled as u64
    }
}

/// Builds the tooltip from the non-zero fields, in a fixed order.
pub fn tooltip(
    input: &ProgressInput,
    progress: &ProgressOutput,
    formatter: &dyn CurrencyFormatter,
) -> String {
    let money = |amount: i64| formatter.format(amount, AmountKind::Financial);
    let mut parts = Vec::new();

    if progress.has_baseline() {
        parts.push(format!("{}% complete", percent(progress)));
    }
    if let Some(template) = input.effective_template() {
        parts.push(format!("Template: {}", money(saturating_i64(template))));
    }
    if input.assigned != 0 {
        parts.push(format!("Assigned: {}", money(input.assigned)));
    }
    let spent = input.spent();
    if spent != 0 {
        parts.push(format!("Spent: {}", money(saturating_i64(spent))));
    }
    if input.balance != 0 {
        parts.push(format!("Balance: {}", money(input.balance)));
    }

    parts.join(TOOLTIP_SEPARATOR)
}

/// Lays out the fill segments over the track.
///
/// When there is overflow, the spent and overflow segments are rescaled so
/// together they span the full width.
pub fn segments(progress: &ProgressOutput) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(3);

    if let Some(budgeted) = progress.budgeted_ratio {
        segments.push(Segment {
            kind: SegmentKind::Budgeted,
            offset: 0.0,
            width: budgeted,
        });
    }

    if progress.has_overflow() {
        let total = progress.total_ratio();
        let spent_width = progress.progress_ratio / total;
        segments.push(Segment {
            kind: SegmentKind::Spent,
            offset: 0.0,
            width: spent_width,
        });
        segments.push(Segment {
            kind: SegmentKind::Overflow,
            offset: spent_width,
            width: progress.overflow_ratio / total,
        });
    } else {
        segments.push(Segment {
            kind: SegmentKind::Spent,
            offset: 0.0,
            width: progress.progress_ratio,
        });
    }

    segments
}

fn saturating_i64(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

// ============================================================================
// Tests
// ============================================================================
