//! Config command - manage settings.

use anyhow::Result;
use budgetbar_core::{
    AmountKind, CoreError, CurrencyFormatter, FinancialFormatter, ProgressPolicy,
};
use budgetbar_store::{default_config_dir, LogLevel, SettingsStore};
use clap::{Args, Subcommand};
use tracing::info;

use super::open_settings;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Turn a feature flag on or off.
    Flag {
        /// Flag name, e.g. category-progress-bars.
        name: String,
        /// on or off.
        state: String,
    },

    /// Turn a global preference on or off.
    Pref {
        /// Preference name, e.g. showProgressBars.
        name: String,
        /// on or off.
        state: String,
    },

    /// Set the calculation policy.
    Policy {
        /// simple or template.
        policy: ProgressPolicy,
    },

    /// Set currency formatting.
    Currency {
        /// Currency symbol placed before the amount.
        symbol: String,

        /// Thousands separator.
        #[arg(long, default_value = ",")]
        thousands: char,

        /// Disable digit grouping.
        #[arg(long, conflicts_with = "thousands")]
        no_grouping: bool,

        /// Decimal separator.
        #[arg(long, default_value = ".")]
        decimal: char,
    },

    /// Set the bar width in cells.
    Width {
        /// Width in cells.
        width: usize,
    },

    /// Set the log level.
    LogLevel {
        /// error, warn, info, debug or trace.
        level: LogLevel,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let store = open_settings(cli).await?;

    match &args.action {
        ConfigAction::Show => show_config(&store, cli).await,
        ConfigAction::Path => show_paths(&store, cli),
        ConfigAction::Flag { name, state } => {
            let enabled = parse_toggle(state)?;
            store.set_flag(name, enabled).await;
            save(&store, &format!("Flag {name}: {}", on_off(enabled))).await
        }
        ConfigAction::Pref { name, state } => {
            let value = parse_toggle(state)?;
            store.set_preference(name, value).await;
            save(&store, &format!("Preference {name}: {}", on_off(value))).await
        }
        ConfigAction::Policy { policy } => {
            store.set_progress_policy(*policy).await;
            save(&store, &format!("Progress policy set to: {policy}")).await
        }
        ConfigAction::Currency {
            symbol,
            thousands,
            no_grouping,
            decimal,
        } => {
            let currency = FinancialFormatter {
                symbol: symbol.clone(),
                thousands_separator: (!no_grouping).then_some(*thousands),
                decimal_separator: *decimal,
            };
            let sample = currency.format(123_456_789, AmountKind::Financial);
            store.set_currency(currency).await;
            save(&store, &format!("Currency set, e.g. {sample}")).await
        }
        ConfigAction::Width { width } => {
            store.set_bar_width(*width).await;
            let width = store.bar_width().await;
            save(&store, &format!("Bar width set to: {width}")).await
        }
        ConfigAction::LogLevel { level } => {
            store.update(|s| s.log_level = *level).await;
            save(&store, &format!("Log level set to: {level}")).await
        }
        ConfigAction::Reset => reset_config(&store).await,
    }
}

async fn show_config(store: &SettingsStore, cli: &Cli) -> Result<()> {
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("BudgetBar Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Feature flags:");
            for (name, enabled) in &settings.feature_flags {
                println!("  • {name}: {}", on_off(*enabled));
            }
            println!("Preferences:");
            for (name, value) in &settings.preferences {
                println!("  • {name}: {}", on_off(*value));
            }
            println!();
            println!("Progress policy: {}", settings.progress_policy);
            println!(
                "Currency: {}",
                settings.currency.format(123_456_789, AmountKind::Financial)
            );
            println!("Bar width: {}", settings.bar_width);
            println!("Log level: {}", settings.log_level);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(store: &SettingsStore, cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = store.path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn save(store: &SettingsStore, message: &str) -> Result<()> {
    store.save().await?;
    info!(path = %store.path().display(), "Configuration updated");
    println!("{message}");
    Ok(())
}

async fn reset_config(store: &SettingsStore) -> Result<()> {
    let path = store.path();

    if path.exists() {
        tokio::fs::remove_file(path).await?;
        store.reset().await;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}

/// Parses an on/off toggle.
pub fn parse_toggle(value: &str) -> Result<bool, CoreError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" | "enable" | "enabled" => Ok(true),
        "off" | "false" | "no" | "0" | "disable" | "disabled" => Ok(false),
        other => Err(CoreError::InvalidConfig(format!(
            "expected on or off, got '{other}'"
        ))),
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toggle() {
        assert!(parse_toggle("on").unwrap());
        assert!(parse_toggle(" YES ").unwrap());
        assert!(!parse_toggle("off").unwrap());
        assert!(!parse_toggle("false").unwrap());
        assert!(parse_toggle("maybe").is_err());
    }

    #[test]
    fn test_on_off() {
        assert_eq!(on_off(true), "on");
        assert_eq!(on_off(false), "off");
    }
}
