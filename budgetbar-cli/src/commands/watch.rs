//! Watch command - re-render category bars on a timer.

use anyhow::Result;
use budgetbar_core::ProgressBarView;
use budgetbar_store::load_categories;
use clap::Args;
use std::collections::HashMap;
use std::io::{stdout, Write};
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use super::show::{filter_group, format_output};
use super::{open_settings, require_file};
use crate::output::TextFormatter;
use crate::rows::{render_rows_memoized, RowCache, RowKey};
use crate::{Cli, OutputFormat};

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds.
    #[arg(long, short = 'n', default_value = "5")]
    pub interval: u64,

    /// Minimum interval to use.
    #[arg(long, default_value = "1")]
    pub min_interval: u64,

    /// Only show categories in this group.
    #[arg(long, short)]
    pub group: Option<String>,
}

/// Runs the watch command.
///
/// The category file and settings are re-read on every tick, so edits show
/// up without restarting. Progress is only recomputed for rows whose inputs
/// changed.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let path = require_file(cli)?;
    let refresh_interval = args.interval.max(args.min_interval).max(1);

    info!(path = %path.display(), interval = refresh_interval, "Starting watch mode");

    let errors = TextFormatter::new(!cli.no_color);
    let mut caches: HashMap<RowKey, RowCache> = HashMap::new();
    let mut last_json: Option<String> = None;
    let mut ticker = interval(Duration::from_secs(refresh_interval));

    loop {
        ticker.tick().await;

        let store = match open_settings(cli).await {
            Ok(reloaded) => reloaded,
            Err(e) => {
                warn!(error = %e, "Failed to reload settings, keeping previous");
                continue;
            }
        };
        let settings = store.get().await;

        let rows = match load_categories(path).await {
            Ok(rows) => filter_group(rows, args.group.as_deref()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to reload categories");
                if cli.format == OutputFormat::Text {
                    println!(
                        "{}",
                        errors.format_error(&path.display().to_string(), &e.to_string())
                    );
                }
                continue;
            }
        };

        let view = ProgressBarView::new(&settings, &settings, &settings.currency)
            .with_policy(settings.progress_policy);
        let (rendered, changed) = render_rows_memoized(rows, &view, &mut caches);
        debug!(rows = rendered.len(), changed, "Refreshed categories");

        let body = format_output(&rendered, cli, settings.bar_width, true)?;

        match cli.format {
            OutputFormat::Text => {
                // Clear screen
                print!("\x1b[2J\x1b[H");
                stdout().flush()?;

                let now = chrono::Local::now();
                println!(
                    "BudgetBar Watch Mode - {} (refresh: {}s, policy: {})",
                    now.format("%H:%M:%S"),
                    refresh_interval,
                    settings.progress_policy
                );
                println!("{}", "─".repeat(50));
                println!();
                println!("{body}");
                println!();
                println!("Press Ctrl+C to exit");
            }
            OutputFormat::Json => {
                if json_changed(&mut last_json, body) {
                    if let Some(json) = &last_json {
                        println!("{json}");
                    }
                }
            }
        }
    }
}

/// Records `body` as the latest JSON document, returning true if it differs
/// from the previous one.
fn json_changed(last: &mut Option<String>, body: String) -> bool {
    if last.as_deref() == Some(body.as_str()) {
        return false;
    }
    *last = Some(body);
    true
}
