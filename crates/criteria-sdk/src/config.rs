//! Configuration types for FilterEditor

use crate::error::{Result, SdkError};
use criteria_core::{FieldCatalog, GROUP_BEAN};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Edit session configuration
///
/// Loaded from YAML or JSON:
///
/// ```yaml
/// group_bean: criteria.condition.GroupCondition
/// computed_aliases: [total_amount, age_in_days]
/// confirm_group_removal: true
/// allow_empty_groups: false
/// catalog_file: fields.json
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Wire discriminator of groups
    pub group_bean: String,

    /// Computed columns; never reported as fields to fetch
    pub computed_aliases: Vec<String>,

    /// Removing a nested group needs explicit confirmation
    pub confirm_group_removal: bool,

    /// Removing the last child of a group is allowed
    pub allow_empty_groups: bool,

    /// Field catalog to load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
}

impl EditorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            group_bean: GROUP_BEAN.to_string(),
            computed_aliases: Vec::new(),
            confirm_group_removal: true,
            allow_empty_groups: false,
            catalog_file: None,
        }
    }

    /// Load configuration from a YAML (`.yaml`/`.yml`) or JSON file.
    ///
    /// A relative `catalog_file` is resolved against the config file's
    /// directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config: EditorConfig = read_document(path)?;
        if let Some(dir) = path.parent() {
            config.catalog_file = config.catalog_file.take().map(|catalog| {
                if catalog.is_relative() {
                    dir.join(catalog)
                } else {
                    catalog
                }
            });
        }
        config.validate()?;
        Ok(config)
    }

    /// Set group discriminator
    pub fn with_group_bean(mut self, group_bean: impl Into<String>) -> Self {
        self.group_bean = group_bean.into();
        self
    }

    /// Add computed aliases
    pub fn with_computed_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.computed_aliases
            .extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Require confirmation before removing nested groups
    pub fn confirm_group_removal(mut self, confirm: bool) -> Self {
        self.confirm_group_removal = confirm;
        self
    }

    /// Allow removing the last child of a group
    pub fn allow_empty_groups(mut self, allow: bool) -> Self {
        self.allow_empty_groups = allow;
        self
    }

    /// Set catalog file
    pub fn with_catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_file = Some(path.into());
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.group_bean.trim().is_empty() {
            return Err(SdkError::ConfigError(
                "group_bean must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a field catalog from a YAML or JSON file
pub fn load_catalog(path: impl AsRef<Path>) -> Result<FieldCatalog> {
    let path = path.as_ref();
    let catalog: FieldCatalog = read_document(path)
        .map_err(|e| SdkError::CatalogError(format!("{}: {}", path.display(), e)))?;
    tracing::debug!("Loaded {} field(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Read a YAML or JSON document, picking the format from the extension
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        _ => Ok(serde_json::from_str(&content)?),
    }
}
