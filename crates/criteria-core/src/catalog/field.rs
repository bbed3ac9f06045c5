//! Field catalog
//!
//! The list of fields a filter may reference, as supplied by the schema
//! service: `[{ "alias": "age", "type": "java.lang.Integer", "typeShort": "Integer" }]`.

use super::operator::{operators_for, OperatorDescriptor};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A field that conditions can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field path used as a leaf's `fieldName`
    pub alias: String,

    /// Full data type name (used as the value `@type`)
    #[serde(rename = "type")]
    pub field_type: String,

    /// Short data type name (used for operator lookup)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_short: Option<String>,
}

impl FieldDefinition {
    /// Create a new field
    pub fn new(alias: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            field_type: field_type.into(),
            type_short: None,
        }
    }

    /// Set short type name
    pub fn with_type_short(mut self, type_short: impl Into<String>) -> Self {
        self.type_short = Some(type_short.into());
        self
    }

    /// Key used to look up operators for this field.
    ///
    /// `typeShort` when present, otherwise the last dotted segment of the
    /// full type (`java.lang.String` -> `String`).
    pub fn type_key(&self) -> &str {
        match self.type_short.as_deref() {
            Some(short) if !short.is_empty() => short,
            _ => self
                .field_type
                .rsplit('.')
                .next()
                .unwrap_or(&self.field_type),
        }
    }

    /// Operators legal for this field
    pub fn operators(&self) -> Vec<&'static OperatorDescriptor> {
        operators_for(self.type_key())
    }
}

/// Ordered list of field definitions, looked up by alias
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<FieldDefinition>,
}

impl FieldCatalog {
    /// Create a catalog from definitions
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Add a field
    pub fn add_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by alias. With duplicate aliases the first one wins.
    pub fn get(&self, alias: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.alias == alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// Get a field by alias, failing if it is not catalogued
    pub fn require(&self, alias: &str) -> Result<&FieldDefinition> {
        self.get(alias)
            .ok_or_else(|| CoreError::UnknownField(alias.to_string()))
    }

    /// Operators legal for the field `alias`
    pub fn operators_for_field(&self, alias: &str) -> Result<Vec<&'static OperatorDescriptor>> {
        Ok(self.require(alias)?.operators())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldDefinition> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = FieldDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
