//! Builder pattern for FilterEditor

use crate::config::{load_catalog, EditorConfig};
use crate::editor::FilterEditor;
use crate::error::Result;
use criteria_core::FieldCatalog;
use serde_json::Value;
use std::path::PathBuf;

/// Builder for FilterEditor
///
/// # Example
///
/// ```rust,ignore
/// use criteria_sdk::{EditorConfig, FilterEditorBuilder};
///
/// // New filter over a catalog file
/// let editor = FilterEditorBuilder::new()
///     .with_catalog_file("fields.json")
///     .with_aliases(["total_amount"])
///     .build()?;
///
/// // Edit a saved filter
/// let editor = FilterEditorBuilder::new()
///     .with_config(EditorConfig::from_file("editor.yaml")?)
///     .with_payload(saved_criteria)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct FilterEditorBuilder {
    config: EditorConfig,
    catalog: Option<FieldCatalog>,
    aliases: Vec<String>,
    payload: Option<Value>,
}

impl FilterEditorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the field catalog directly
    pub fn with_catalog(mut self, catalog: FieldCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load the field catalog from a file (overrides the config's `catalog_file`)
    pub fn with_catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog_file = Some(path.into());
        self
    }

    /// Add computed aliases
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Start from a saved payload instead of an empty filter
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Build the editor
    ///
    /// A catalog given with `with_catalog` wins over `catalog_file`. Without
    /// either the catalog is empty.
    pub fn build(self) -> Result<FilterEditor> {
        self.config.validate()?;

        let catalog = match (self.catalog, &self.config.catalog_file) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => load_catalog(path)?,
            (None, None) => FieldCatalog::default(),
        };

        let mut editor = FilterEditor::new(catalog, self.config);
        editor.add_aliases(self.aliases);
        if let Some(payload) = &self.payload {
            editor.load(payload);
        }
        Ok(editor)
    }
}
