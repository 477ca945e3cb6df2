//! Category file loading.
//!
//! Category rows are read from JSON or YAML. Either a bare list of rows or an
//! object with a `categories` list is accepted:
//!
//! ```yaml
//! categories:
//!   - name: Groceries
//!     group: Everyday
//!     assigned: 40000
//!     activity: -12550
//!     balance: 27450
//!   - name: Vacation
//!     assigned: 5000
//!     activity: 0
//!     balance: 5000
//!     template: 20000
//! ```

use budgetbar_core::ProgressInput;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::StoreError;

/// One budget category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Category name.
    pub name: String,
    /// Owning category group, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Monetary inputs for the progress bar.
    #[serde(flatten)]
    pub input: ProgressInput,
}

impl CategoryRow {
    /// Creates a row without a group.
    pub fn new(name: impl Into<String>, input: ProgressInput) -> Self {
        Self {
            name: name.into(),
            group: None,
            input,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryDocument {
    List(Vec<CategoryRow>),
    Wrapped { categories: Vec<CategoryRow> },
}

impl CategoryDocument {
    fn into_rows(self) -> Vec<CategoryRow> {
        match self {
            CategoryDocument::List(rows) | CategoryDocument::Wrapped { categories: rows } => rows,
        }
    }
}

/// Serialization format of a category file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl CategoryFormat {
    /// Picks the format from the file extension; anything but
    /// `.yaml`/`.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => CategoryFormat::Yaml,
            _ => CategoryFormat::Json,
        }
    }
}

/// Parses category rows from a string.
///
/// # Errors
///
/// Returns a parse error if the document is malformed or a row has an
/// empty name.
pub fn parse_categories(content: &str, format: CategoryFormat) -> Result<Vec<CategoryRow>, StoreError> {
    let document: CategoryDocument = match format {
        CategoryFormat::Json => serde_json::from_str(content)?,
        CategoryFormat::Yaml => serde_yaml::from_str(content)?,
    };
    let rows = document.into_rows();

    if let Some(index) = rows.iter().position(|r| r.name.trim().is_empty()) {
        return Err(StoreError::Parse(format!("category #{} has an empty name", index + 1)));
    }

    let mut seen = HashSet::new();
    for row in &rows {
        if !seen.insert(row.name.as_str()) {
            warn!(category = %row.name, "Duplicate category name");
        }
    }

    Ok(rows)
}

/// Loads category rows from a JSON or YAML file.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist, or an IO/parse error.
pub async fn load_categories(path: &Path) -> Result<Vec<CategoryRow>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.display().to_string()));
    }

    let format = CategoryFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Loading categories");

    let content = tokio::fs::read_to_string(path).await?;
    let rows = parse_categories(&content, format)?;

    debug!(path = %path.display(), count = rows.len(), "Categories loaded");
    Ok(rows)
}
