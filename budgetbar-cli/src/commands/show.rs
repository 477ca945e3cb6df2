//! Show command - render category progress bars.

use anyhow::Result;
use budgetbar_core::{ProgressBarView, ProgressPolicy};
use budgetbar_store::{load_categories, CategoryRow, MAX_BAR_WIDTH, MIN_BAR_WIDTH};
use clap::Args;
use tracing::{debug, info};

use super::{open_settings, require_file};
use crate::output::{JsonFormatter, TextFormatter};
use crate::rows::{render_rows, RenderedRow};
use crate::{Cli, OutputFormat};

/// Arguments for the show command.
#[derive(Args, Default)]
pub struct ShowArgs {
    /// Calculation policy (simple, template). Overrides the settings file.
    #[arg(long)]
    pub policy: Option<ProgressPolicy>,

    /// Bar width in cells. Overrides the settings file.
    #[arg(long, short)]
    pub width: Option<usize>,

    /// Only show categories in this group.
    #[arg(long, short)]
    pub group: Option<String>,

    /// Hide the tooltip line under each bar.
    #[arg(long)]
    pub no_tooltip: bool,
}

/// Runs the show command.
pub async fn run(args: &ShowArgs, cli: &Cli) -> Result<()> {
    let path = require_file(cli)?;
    let store = open_settings(cli).await?;
    let settings = store.get().await;

    let policy = args.policy.unwrap_or(settings.progress_policy);
    info!(path = %path.display(), %policy, "Rendering categories");

    let rows = filter_group(load_categories(path).await?, args.group.as_deref());

    let view =
        ProgressBarView::new(&settings, &settings, &settings.currency).with_policy(policy);
    if !view.is_enabled() {
        debug!("Progress bars disabled by feature flag or preference");
    }

    let rendered = render_rows(rows, &view);
    let over_budget = rendered.iter().filter(|r| r.progress.state.is_over()).count();
    info!(rows = rendered.len(), over_budget, "Categories rendered");

    let width = args.width.unwrap_or(settings.bar_width);
    println!("{}", format_output(&rendered, cli, width, !args.no_tooltip)?);

    Ok(())
}

/// Formats rendered rows in the output format selected on the command line.
pub fn format_output(
    rendered: &[RenderedRow],
    cli: &Cli,
    bar_width: usize,
    show_tooltips: bool,
) -> Result<String> {
    match cli.format {
        OutputFormat::Text => Ok(TextFormatter::new(!cli.no_color)
            .with_bar_width(bar_width.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH))
            .with_tooltips(show_tooltips)
            .format_rows(rendered)),
        OutputFormat::Json => JsonFormatter::new(cli.pretty).format_rows(rendered),
    }
}

/// Keeps rows whose group matches `group`, ignoring case.
pub fn filter_group(rows: Vec<CategoryRow>, group: Option<&str>) -> Vec<CategoryRow> {
    let Some(group) = group else {
        return rows;
    };
    rows.into_iter()
        .filter(|row| {
            row.group
                .as_deref()
                .is_some_and(|g| g.eq_ignore_ascii_case(group))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetbar_core::ProgressInput;

    fn grouped(name: &str, group: Option<&str>) -> CategoryRow {
        let mut row = CategoryRow::new(name, ProgressInput::new(100, -10, 90));
        row.group = group.map(str::to_string);
        row
    }

    #[test]
    fn test_filter_group() {
        let rows = vec![
            grouped("Rent", Some("Bills")),
            grouped("Fun", Some("Wants")),
            grouped("Loose", None),
        ];

        let all = filter_group(rows.clone(), None);
        assert_eq!(all.len(), 3);

        let bills = filter_group(rows, Some("bills"));
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].name, "Rent");
    }
}
