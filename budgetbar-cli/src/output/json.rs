//! JSON output formatting.

use anyhow::Result;
use budgetbar_core::{BarRender, ProgressInput, ProgressOutput, Segment};
use serde::Serialize;

use crate::rows::RenderedRow;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single category.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOutput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(flatten)]
    pub input: ProgressInput,
    pub progress: ProgressOutput,
    /// `null` when the bar is suppressed.
    pub bar: Option<BarOutput>,
}

/// Drawable part of a bar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarOutput {
    /// Theme token of the fill tone.
    pub tone: &'static str,
    pub percent: u64,
    pub tooltip: String,
    pub segments: Vec<Segment>,
}

impl From<&BarRender> for BarOutput {
    fn from(bar: &BarRender) -> Self {
        Self {
            tone: bar.tone.token(),
            percent: bar.percent,
            tooltip: bar.tooltip.clone(),
            segments: bar.segments.clone(),
        }
    }
}

impl From<&RenderedRow> for CategoryOutput {
    fn from(rendered: &RenderedRow) -> Self {
        Self {
            name: rendered.row.name.clone(),
            group: rendered.row.group.clone(),
            input: rendered.row.input,
            progress: rendered.progress,
            bar: rendered.bar.as_ref().map(BarOutput::from),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats rendered category rows as a JSON array.
    pub fn format_rows(&self, rows: &[RenderedRow]) -> Result<String> {
        let outputs: Vec<CategoryOutput> = rows.iter().map(CategoryOutput::from).collect();
        self.format(&outputs)
    }
}

// ============================================================================
// Tests
// ============================================================================
