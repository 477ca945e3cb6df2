//! Text output formatting with progress bars and colors.

use budgetbar_core::{BarRender, ColorTheme, ColorTone, SegmentKind};

use crate::rows::RenderedRow;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DARK_RED: &str = "\x1b[2;31m";
const DIM_GREEN: &str = "\x1b[2;32m";
const DIM_YELLOW: &str = "\x1b[2;33m";
const DIM_RED: &str = "\x1b[2;31m";

// Progress bar characters
const BAR_SPENT: char = '█';
const BAR_OVERFLOW: char = '▓';
const BAR_BUDGETED: char = '▒';
const BAR_EMPTY: char = '░';

const NAME_WIDTH: usize = 20;

/// Maps bar tones to ANSI escape codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTheme;

impl ColorTheme for AnsiTheme {
    type Color = &'static str;

    fn color_for(&self, tone: ColorTone, segment: SegmentKind) -> Self::Color {
        match (segment, tone) {
            (SegmentKind::Overflow, _) => DARK_RED,
            (SegmentKind::Spent, ColorTone::Positive) => GREEN,
            (SegmentKind::Spent, ColorTone::Warning) => YELLOW,
            (SegmentKind::Spent, ColorTone::Negative) => RED,
            (SegmentKind::Budgeted, ColorTone::Positive) => DIM_GREEN,
            (SegmentKind::Budgeted, ColorTone::Warning) => DIM_YELLOW,
            (SegmentKind::Budgeted, ColorTone::Negative) => DIM_RED,
        }
    }
}

/// Number of cells each fill occupies in a bar of a given width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCounts {
    /// Cells for the spent segment.
    pub spent: usize,
    /// Cells for the overflow segment.
    pub overflow: usize,
    /// Cells for the budgeted segment not covered by spending.
    pub budgeted: usize,
    /// Remaining track cells.
    pub empty: usize,
}

impl CellCounts {
    /// Lays out `bar` over `width` cells.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn layout(bar: &BarRender, width: usize) -> Self {
        let cells = |fraction: f64| -> usize {
            let scaled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
            scaled.min(width)
        };

        let spent_end = bar.segment(SegmentKind::Spent).map_or(0, |s| cells(s.end()));
        let overflow_end = bar
            .segment(SegmentKind::Overflow)
            .map_or(spent_end, |s| cells(s.end()).max(spent_end));
        let budgeted_end = bar
            .segment(SegmentKind::Budgeted)
            .map_or(overflow_end, |s| cells(s.end()).max(overflow_end));

        Self {
            spent: spent_end,
            overflow: overflow_end - spent_end,
            budgeted: budgeted_end - overflow_end,
            empty: width - budgeted_end,
        }
    }
}

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    show_tooltips: bool,
    bar_width: usize,
    theme: AnsiTheme,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            show_tooltips: true,
            bar_width: 20,
            theme: AnsiTheme,
        }
    }

    /// Set the progress bar width.
    #[must_use]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Show or hide the tooltip line under each bar.
    #[must_use]
    pub fn with_tooltips(mut self, show: bool) -> Self {
        self.show_tooltips = show;
        self
    }

    /// Formats all rows, grouped under their category group headers.
    pub fn format_rows(&self, rows: &[RenderedRow]) -> String {
        let mut lines = Vec::new();
        let mut current_group: Option<&str> = None;

        for rendered in rows {
            let group = rendered.row.group.as_deref();
            if group.is_some() && group != current_group {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(self.bold(group.unwrap_or_default()));
            }
            current_group = group;
            lines.push(self.format_row(rendered));
        }

        if lines.is_empty() {
            return self.dim("No categories");
        }
        lines.join("\n")
    }

    /// Formats one category row.
    ///
    /// Rows whose bar is suppressed show only the name.
    pub fn format_row(&self, rendered: &RenderedRow) -> String {
        let name = truncate(&rendered.row.name, NAME_WIDTH);
        let Some(bar) = &rendered.bar else {
            return name;
        };

        let percent = self.paint(
            &format!("{:>4}%", bar.percent),
            self.theme.color_for(bar.tone, SegmentKind::Spent),
        );
        let mut result = format!("{name:<NAME_WIDTH$} {} {percent}", self.progress_bar(bar));

        if self.show_tooltips && !bar.tooltip.is_empty() {
            result.push_str(&format!("\n{:NAME_WIDTH$} {}", "", self.dim(&bar.tooltip)));
        }
        result
    }

    /// Formats a bar as a row of block characters.
    pub fn progress_bar(&self, bar: &BarRender) -> String {
        let counts = CellCounts::layout(bar, self.bar_width);
        let fill = |ch: char, n: usize| ch.to_string().repeat(n);

        [
            self.paint(
                &fill(BAR_SPENT, counts.spent),
                self.theme.color_for(bar.tone, SegmentKind::Spent),
            ),
            self.paint(
                &fill(BAR_OVERFLOW, counts.overflow),
                self.theme.color_for(bar.tone, SegmentKind::Overflow),
            ),
            self.paint(
                &fill(BAR_BUDGETED, counts.budgeted),
                self.theme.color_for(bar.tone, SegmentKind::Budgeted),
            ),
            fill(BAR_EMPTY, counts.empty),
        ]
        .concat()
    }

    /// Formats an error message.
    pub fn format_error(&self, context: &str, error: &str) -> String {
        format!("{}: {} - {}", self.bold(context), self.paint("Error", RED), error)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors && !text.is_empty() {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, BOLD)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, DIM)
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_overflow_is_dark_red() {
        let theme = AnsiTheme;
        for tone in [ColorTone::Positive, ColorTone::Warning, ColorTone::Negative] {
            assert_eq!(theme.color_for(tone, SegmentKind::Overflow), DARK_RED);
        }
        assert_eq!(theme.color_for(ColorTone::Warning, SegmentKind::Spent), YELLOW);
    }

    #[test]
    fn test_paint_skips_empty_and_uncolored() {
        let plain = TextFormatter::new(false);
        assert_eq!(plain.paint("x", RED), "x");

        let colored = TextFormatter::new(true);
        assert_eq!(colored.paint("", RED), "");
        assert_eq!(colored.paint("x", RED), format!("{RED}x{RESET}"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Rent", 20), "Rent");
        assert_eq!(truncate("Very Long Category Name Here", 10), "Very Long…");
    }
}
