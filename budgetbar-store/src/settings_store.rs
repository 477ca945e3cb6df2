//! User preferences store.
//!
//! Manages feature flags, global preferences and display settings with
//! persistence and change notification.

use budgetbar_core::{
    FeatureFlags, FinancialFormatter, Preferences, ProgressPolicy, PROGRESS_BARS_FLAG,
    SHOW_PROGRESS_BARS_PREF,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Narrowest bar the CLI will draw.
pub const MIN_BAR_WIDTH: usize = 5;

/// Widest bar the CLI will draw.
pub const MAX_BAR_WIDTH: usize = 80;

// ============================================================================
// Settings Types
// ============================================================================

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Feature flags by name.
    pub feature_flags: BTreeMap<String, bool>,

    /// Global boolean preferences by name.
    pub preferences: BTreeMap<String, bool>,

    /// Calculation policy for category progress.
    pub progress_policy: ProgressPolicy,

    /// Currency formatting.
    pub currency: FinancialFormatter,

    /// Width of terminal bars in cells.
    pub bar_width: usize,

    /// Log level.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        let mut feature_flags = BTreeMap::new();
        feature_flags.insert(PROGRESS_BARS_FLAG.to_string(), true);

        let mut preferences = BTreeMap::new();
        preferences.insert(SHOW_PROGRESS_BARS_PREF.to_string(), true);

        Self {
            feature_flags,
            preferences,
            progress_policy: ProgressPolicy::Simple,
            currency: FinancialFormatter::default(),
            bar_width: 20,
            log_level: LogLevel::default(),
        }
    }
}

impl FeatureFlags for Settings {
    fn is_enabled(&self, flag: &str) -> bool {
        self.feature_flags.is_enabled(flag)
    }
}

impl Preferences for Settings {
    fn global_preference(&self, name: &str) -> Option<bool> {
        self.preferences.get(name).copied()
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(StoreError::Config(format!("unknown log level '{other}'"))),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl SettingsStore {
    /// Creates a store with default settings, backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be loaded from disk.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing or unreadable file yields default settings.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` is kept for callers that chain `?`.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json_or_default(&path).await
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        Ok(Self::with_settings(path, settings))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify_change().await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Restores defaults and notifies subscribers.
    pub async fn reset(&self) {
        self.update(|s| *s = Settings::default()).await;
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Checks if a feature flag is enabled.
    pub async fn is_flag_enabled(&self, flag: &str) -> bool {
        self.settings.read().await.is_enabled(flag)
    }

    /// Enables or disables a feature flag.
    pub async fn set_flag(&self, flag: &str, enabled: bool) {
        debug!(flag, enabled, "Setting feature flag");
        let flag = flag.to_string();
        self.update(|s| {
            s.feature_flags.insert(flag, enabled);
        })
        .await;
    }

    /// Gets a global preference.
    pub async fn preference(&self, name: &str) -> Option<bool> {
        self.settings.read().await.global_preference(name)
    }

    /// Sets a global preference.
    pub async fn set_preference(&self, name: &str, value: bool) {
        debug!(name, value, "Setting preference");
        let name = name.to_string();
        self.update(|s| {
            s.preferences.insert(name, value);
        })
        .await;
    }

    /// Gets the progress calculation policy.
    pub async fn progress_policy(&self) -> ProgressPolicy {
        self.settings.read().await.progress_policy
    }

    /// Sets the progress calculation policy.
    pub async fn set_progress_policy(&self, policy: ProgressPolicy) {
        self.update(|s| s.progress_policy = policy).await;
    }

    /// Gets the currency formatter.
    pub async fn currency(&self) -> FinancialFormatter {
        self.settings.read().await.currency.clone()
    }

    /// Sets the currency formatter.
    pub async fn set_currency(&self, currency: FinancialFormatter) {
        self.update(|s| s.currency = currency).await;
    }

    /// Gets the bar width.
    pub async fn bar_width(&self) -> usize {
        self.settings.read().await.bar_width
    }

    /// Sets the bar width, clamped to the supported range.
    pub async fn set_bar_width(&self, width: usize) {
        let clamped = width.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        if clamped != width {
            warn!(requested = width, used = clamped, "Bar width out of range, clamping");
        }
        self.update(|s| s.bar_width = clamped).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_show_bars() {
        let settings = Settings::default();
        assert!(settings.is_enabled(PROGRESS_BARS_FLAG));
        assert_eq!(settings.global_preference(SHOW_PROGRESS_BARS_PREF), Some(true));
        assert_eq!(settings.progress_policy, ProgressPolicy::Simple);
        assert_eq!(settings.bar_width, 20);
    }

    #[test]
    fn test_unknown_flag_is_disabled() {
        let settings = Settings::default();
        assert!(!settings.is_enabled("something-else"));
        assert_eq!(settings.global_preference("somethingElse"), None);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"progress_policy":"template_aware"}"#).unwrap();
        assert_eq!(settings.progress_policy, ProgressPolicy::TemplateAware);
        assert!(settings.is_enabled(PROGRESS_BARS_FLAG));
        assert_eq!(settings.currency.symbol, "$");
    }

    #[tokio::test]
    async fn test_flag_and_preference_updates() {
        let store = SettingsStore::new(PathBuf::from("/tmp/budgetbar_test_flags.json"));

        assert!(store.is_flag_enabled(PROGRESS_BARS_FLAG).await);
        store.set_flag(PROGRESS_BARS_FLAG, false).await;
        assert!(!store.is_flag_enabled(PROGRESS_BARS_FLAG).await);

        assert_eq!(store.preference(SHOW_PROGRESS_BARS_PREF).await, Some(true));
        store.set_preference(SHOW_PROGRESS_BARS_PREF, false).await;
        assert_eq!(store.preference(SHOW_PROGRESS_BARS_PREF).await, Some(false));
    }

    #[tokio::test]
    async fn test_updates_notify_subscribers() {
        let store = SettingsStore::new(PathBuf::from("/tmp/budgetbar_test_notify.json"));
        let mut rx = store.subscribe();

        store.set_progress_policy(ProgressPolicy::TemplateAware).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        store.set_bar_width(30).await;
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test]
    async fn test_bar_width_is_clamped() {
        let store = SettingsStore::new(PathBuf::from("/tmp/budgetbar_test_width.json"));
        store.set_bar_width(1).await;
        assert_eq!(store.bar_width().await, MIN_BAR_WIDTH);
        store.set_bar_width(500).await;
        assert_eq!(store.bar_width().await, MAX_BAR_WIDTH);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let store = SettingsStore::new(PathBuf::from("/tmp/budgetbar_test_reset.json"));
        store.set_flag(PROGRESS_BARS_FLAG, false).await;
        store.set_currency(FinancialFormatter::with_symbol("€")).await;

        store.reset().await;
        assert_eq!(store.get().await, Settings::default());
    }

    #[test]
    fn test_log_level_parse_and_display() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
