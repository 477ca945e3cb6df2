//! CLI command implementations.

pub mod config;
pub mod show;
pub mod watch;

use anyhow::{Context, Result};
use budgetbar_store::SettingsStore;
use std::path::Path;

use crate::Cli;

/// Opens the settings store named by `--settings`, or the default one.
pub async fn open_settings(cli: &Cli) -> Result<SettingsStore> {
    let store = match &cli.settings {
        Some(path) => SettingsStore::load(path.clone()).await?,
        None => SettingsStore::load_default().await?,
    };
    Ok(store)
}

/// Returns the category file from `--file`, or fails with a usage hint.
pub fn require_file(cli: &Cli) -> Result<&Path> {
    cli.file
        .as_deref()
        .context("No category file given. Use --file <path>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetbar_core::ProgressPolicy;
    use clap::Parser;

    #[tokio::test]
    async fn test_open_settings_from_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"progress_policy":"template","bar_width":12}"#)
            .await
            .unwrap();

        let cli = Cli::parse_from(["budgetbar", "--settings", path.to_str().unwrap()]);
        let settings = open_settings(&cli).await.unwrap().get().await;

        assert_eq!(settings.progress_policy, ProgressPolicy::TemplateAware);
        assert_eq!(settings.bar_width, 12);
    }

    #[test]
    fn test_require_file() {
        let cli = Cli::parse_from(["budgetbar"]);
        assert!(require_file(&cli).is_err());

        let cli = Cli::parse_from(["budgetbar", "-i", "budget.yaml"]);
        assert_eq!(require_file(&cli).unwrap(), Path::new("budget.yaml"));
    }
}
