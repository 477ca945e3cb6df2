//! Render-model types produced by [`ProgressBarView`](crate::ProgressBarView).

use serde::{Deserialize, Serialize};

use super::progress::{ProgressOutput, ProgressState};

/// Fill tone for a bar, resolved to a concrete colour by a [`ColorTheme`](crate::ColorTheme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTone {
    /// Healthy spending (green).
    Positive,
    /// Underfunded relative to the template (orange).
    Warning,
    /// Over budget (red).
    Negative,
}

impl ColorTone {
    /// Returns the theme token name for this tone.
    pub fn token(&self) -> &'static str {
        match self {
            ColorTone::Positive => "positive",
            ColorTone::Warning => "warning",
            ColorTone::Negative => "negative",
        }
    }
}

impl From<ProgressState> for ColorTone {
    fn from(state: ProgressState) -> Self {
        match state {
            ProgressState::OverBudget => ColorTone::Negative,
            ProgressState::Underfunded => ColorTone::Warning,
            ProgressState::Funded | ProgressState::WithinBudget | ProgressState::Neutral => {
                ColorTone::Positive
            }
        }
    }
}

/// Which fill a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Translucent share of the template covered by the assigned amount.
    Budgeted,
    /// Primary fill for spending.
    Spent,
    /// Darker fill for spending beyond the baseline.
    Overflow,
}

/// A horizontal fill segment, as fractions of the track width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// What this segment draws.
    pub kind: SegmentKind,
    /// Left edge, in `[0, 1]`.
    pub offset: f64,
    /// Width, in `[0, 1]`.
    pub width: f64,
}

impl Segment {
    /// Right edge of the segment.
    pub fn end(&self) -> f64 {
        self.offset + self.width
    }
}

/// Everything a renderer needs to draw one category's bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarRender {
    /// Calculator output the bar was derived from.
    pub progress: ProgressOutput,
    /// Fill tone.
    pub tone: ColorTone,
    /// Rounded percent of the baseline spent. Can exceed 100 and saturates
    /// at `u64::MAX`.
    pub percent: u64,
    /// Human-readable summary.
    pub tooltip: String,
    /// Fill segments, drawn in order over the track.
    pub segments: Vec<Segment>,
}

impl BarRender {
    /// Returns the segment of the given kind, if present.
    pub fn segment(&self, kind: SegmentKind) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind == kind)
    }
}

/// Kind of amount handed to a [`CurrencyFormatter`](crate::CurrencyFormatter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountKind {
    /// Accounting amount with two decimals.
    #[default]
    Financial,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_mapping_is_exhaustive() {
        assert_eq!(ColorTone::from(ProgressState::OverBudget), ColorTone::Negative);
        assert_eq!(ColorTone::from(ProgressState::Underfunded), ColorTone::Warning);
        assert_eq!(ColorTone::from(ProgressState::Funded), ColorTone::Positive);
        assert_eq!(ColorTone::from(ProgressState::WithinBudget), ColorTone::Positive);
        assert_eq!(ColorTone::from(ProgressState::Neutral), ColorTone::Positive);
    }

    #[test]
    fn test_tone_token() {
        assert_eq!(ColorTone::Negative.token(), "negative");
        assert_eq!(
            serde_json::to_string(&ColorTone::Warning).unwrap(),
            r#""warning""#
        );
    }
}
