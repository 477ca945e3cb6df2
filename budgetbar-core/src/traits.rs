//! Capability traits for BudgetBar.
//!
//! The bar view never reads ambient state. Feature flags, user preferences,
//! currency formatting and colours are handed in through these traits so the
//! view stays pure and can be driven from tests with plain structs.

use std::collections::{BTreeMap, HashMap};

use crate::models::{AmountKind, ColorTone, SegmentKind};

/// Feature flag that gates the category progress bars.
pub const PROGRESS_BARS_FLAG: &str = "category-progress-bars";

/// Global preference controlling whether progress bars are shown.
pub const SHOW_PROGRESS_BARS_PREF: &str = "showProgressBars";

/// Evaluates feature flags by name.
pub trait FeatureFlags {
    /// Returns true if the named flag is enabled.
    fn is_enabled(&self, flag: &str) -> bool;
}

/// Looks up global boolean user preferences by name.
pub trait Preferences {
    /// Returns the preference value, or `None` if it was never set.
    fn global_preference(&self, name: &str) -> Option<bool>;
}

/// Formats amounts given in the smallest currency unit.
pub trait CurrencyFormatter {
    /// Formats `amount` (in cents) for display.
    fn format(&self, amount: i64, kind: AmountKind) -> String;
}

/// Resolves bar tones to concrete colours.
///
/// The colour type is opaque to the core; a terminal renderer may use ANSI
/// escape codes while a GUI toolkit uses its own colour values.
pub trait ColorTheme {
    /// Concrete colour value.
    type Color;

    /// Returns the colour for a segment drawn with the given tone.
    fn color_for(&self, tone: ColorTone, segment: SegmentKind) -> Self::Color;
}

impl FeatureFlags for BTreeMap<String, bool> {
    fn is_enabled(&self, flag: &str) -> bool {
        self.get(flag).copied().unwrap_or(false)
    }
}

impl Preferences for HashMap<String, bool> {
    fn global_preference(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Preferences for BTreeMap<String, bool> {
    fn global_preference(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}
