//! Category rows paired with their computed progress and bar.

use budgetbar_core::{BarRender, ProgressBarView, ProgressMemo, ProgressOutput};
use budgetbar_store::CategoryRow;
use std::collections::HashMap;
use tracing::debug;

/// A category row after calculation and view derivation.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    /// Source row.
    pub row: CategoryRow,
    /// Calculator output, always present.
    pub progress: ProgressOutput,
    /// Bar to draw, or `None` when the view suppresses it.
    pub bar: Option<BarRender>,
}

/// Identifies a row across refreshes: group, name, and the occurrence index
/// among rows sharing that group and name.
pub type RowKey = (Option<String>, String, usize);

/// Per-row state kept between refreshes.
#[derive(Debug, Default)]
pub struct RowCache {
    memo: ProgressMemo,
    bar: Option<BarRender>,
}

/// Computes progress and bars for every row.
pub fn render_rows(rows: Vec<CategoryRow>, view: &ProgressBarView<'_>) -> Vec<RenderedRow> {
    rows.into_iter()
        .map(|row| {
            let progress = view.policy().compute(&row.input);
            let bar = view.render_progress(&row.input, progress);
            RenderedRow { row, progress, bar }
        })
        .collect()
}

/// Like [`render_rows`], reusing per-row caches across refreshes.
///
/// Returns the rendered rows and the number of rows whose progress was
/// recomputed or whose bar differs from the previous refresh. Caches for
/// rows no longer present are dropped.
pub fn render_rows_memoized(
    rows: Vec<CategoryRow>,
    view: &ProgressBarView<'_>,
    caches: &mut HashMap<RowKey, RowCache>,
) -> (Vec<RenderedRow>, usize) {
    let policy = view.policy();
    let keys = row_keys(&rows);
    let mut changed = 0;

    caches.retain(|key, _| keys.contains(key));

    let rendered = rows
        .into_iter()
        .zip(keys)
        .map(|(row, key)| {
            let cache = caches.entry(key).or_default();
            cache.memo.set_policy(policy);

            let progress = cache.memo.get(&row.input);
            let bar = view.render_progress(&row.input, progress);

            if cache.memo.last_recomputed() || cache.bar != bar {
                changed += 1;
                debug!(category = %row.name, state = %progress.state, "Row changed");
            }
            cache.bar.clone_from(&bar);

            RenderedRow { row, progress, bar }
        })
        .collect();

    (rendered, changed)
}

fn row_keys(rows: &[CategoryRow]) -> Vec<RowKey> {
    let mut seen: HashMap<(Option<&str>, &str), usize> = HashMap::new();
    rows.iter()
        .map(|row| {
            let count = seen
                .entry((row.group.as_deref(), row.name.as_str()))
                .or_insert(0);
            let key = (row.group.clone(), row.name.clone(), *count);
            *count += 1;
            key
        })
        .collect()
}
