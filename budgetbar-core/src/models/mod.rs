//! Domain models for BudgetBar.
//!
//! ## Submodules
//!
//! - [`progress`] - Calculator records (ProgressInput, ProgressOutput, ProgressState, ProgressPolicy)
//! - [`bar`] - Render model (BarRender, Segment, ColorTone)

mod bar;
mod progress;

pub use bar::{AmountKind, BarRender, ColorTone, Segment, SegmentKind};
pub use progress::{ProgressInput, ProgressOutput, ProgressPolicy, ProgressState};
