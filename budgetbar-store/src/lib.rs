// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # BudgetBar Store
//!
//! Settings and input loading for BudgetBar.
//!
//! This crate provides:
//!
//! - **SettingsStore**: Feature flags, preferences and display settings with persistence
//! - **Categories**: JSON/YAML category file loading
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use budgetbar_core::ProgressBarView;
//! use budgetbar_store::{load_categories, SettingsStore};
//!
//! let store = SettingsStore::load_default().await?;
//! let settings = store.get().await;
//! let view = ProgressBarView::new(&settings, &settings, &settings.currency)
//!     .with_policy(settings.progress_policy);
//!
//! for row in load_categories(path).await? {
//!     if let Some(bar) = view.render(&row.input) {
//!         println!("{}: {}", row.name, bar.tooltip);
//!     }
//! }
//! ```

pub mod categories;
pub mod error;
pub mod persistence;
pub mod settings_store;

pub use categories::{load_categories, parse_categories, CategoryFormat, CategoryRow};
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_settings_path, ensure_dir, load_json, load_json_or_default,
    save_json,
};
pub use settings_store::{LogLevel, Settings, SettingsStore, MAX_BAR_WIDTH, MIN_BAR_WIDTH};
#[cfg(test)]
mod persistence_tests;
