// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! BudgetBar CLI - budget category progress bars from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Render bars for a category file
//! budgetbar --file budget.yaml
//!
//! # Use the template-aware policy
//! budgetbar show --file budget.yaml --policy template
//!
//! # JSON output
//! budgetbar --file budget.json --format json --pretty
//!
//! # Re-render every 5 seconds
//! budgetbar watch --file budget.yaml --interval 5
//!
//! # Hide bars
//! budgetbar config pref showProgressBars off
//! ```

mod commands;
mod output;
mod rows;

use anyhow::Result;
use budgetbar_store::{LogLevel, StoreError};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, show, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// BudgetBar CLI - budget category progress bars.
#[derive(Parser)]
#[command(name = "budgetbar")]
#[command(about = "Budget category progress bars")]
#[command(long_about = r#"
BudgetBar shows how much of each budget category has been spent.

Category files are JSON or YAML lists of rows:
  { name, group?, assigned, activity, balance, template? }
Amounts are integer minor units (cents).

Examples:
  budgetbar --file budget.yaml                  # Render bars
  budgetbar show -i budget.yaml --policy template
  budgetbar --file budget.json --format json    # JSON output
  budgetbar watch --file budget.yaml            # Re-render on a timer
  budgetbar config show                         # Current settings
"#)]
#[command(version)]
#[command(author = "BudgetBar Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'show' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Category file (JSON or YAML).
    #[arg(long, short = 'i', global = true)]
    pub file: Option<PathBuf>,

    /// Settings file to use instead of the default.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Render category progress bars (default if no command specified).
    #[command(visible_alias = "s")]
    Show(show::ShowArgs),

    /// Re-render on a timer, picking up file edits.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Category file not found.
    FileMissing = 2,
    /// Category or settings file could not be parsed.
    ParseError = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<StoreError>() {
            Some(StoreError::NotFound(_)) => ExitCode::FileMissing,
            Some(e) if e.is_parse_error() => ExitCode::ParseError,
            _ => ExitCode::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("budgetbar=debug,info")
    } else {
        EnvFilter::new(format!("budgetbar={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Reads the configured log level before logging is set up.
async fn configured_log_level(cli: &Cli) -> LogLevel {
    match commands::open_settings(cli).await {
        Ok(store) => store.get().await.log_level,
        Err(_) => LogLevel::default(),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = configured_log_level(&cli).await;
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match &cli.command {
        Some(Commands::Show(args)) => show::run(args, &cli).await,
        Some(Commands::Watch(args)) => watch::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
        None => {
            // Default to show command
            show::run(&show::ShowArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_show() {
        let cli = Cli::parse_from(["budgetbar", "--file", "budget.json"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("budget.json")));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_show_args_parse_policy() {
        let cli = Cli::parse_from([
            "budgetbar", "show", "-i", "b.yaml", "--policy", "template", "--width", "30",
        ]);
        let Some(Commands::Show(args)) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.policy, Some(budgetbar_core::ProgressPolicy::TemplateAware));
        assert_eq!(args.width, Some(30));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["budgetbar", "config", "show", "--format", "json", "--pretty"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.pretty);
    }

    #[test]
    fn test_exit_code_mapping() {
        let missing = anyhow::Error::from(StoreError::NotFound("x".into()));
        assert_eq!(ExitCode::for_error(&missing), ExitCode::FileMissing);

        let parse = anyhow::Error::from(StoreError::Parse("bad".into()));
        assert_eq!(ExitCode::for_error(&parse), ExitCode::ParseError);

        let other = anyhow::anyhow!("boom");
        assert_eq!(ExitCode::for_error(&other), ExitCode::Error);
        assert_eq!(ExitCode::Success as i32, 0);
    }
}
