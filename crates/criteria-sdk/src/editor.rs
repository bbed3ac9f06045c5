//! Filter edit session
//!
//! A `FilterEditor` owns the single reference to the condition tree being
//! edited. Every edit runs a pure tree operation and replaces the tree
//! wholesale with the result, so edits are strictly ordered by the caller.

use crate::builder::FilterEditorBuilder;
use crate::config::EditorConfig;
use crate::error::{Result, SdkError};
use criteria_core::catalog::check_applicable;
use criteria_core::tree;
use criteria_core::{
    diagnose, extract_field_paths, is_complete, Condition, Diagnostic, FieldCatalog, Group,
    GroupOperator, Leaf, NodePath, OperatorDescriptor, RangeBound, ValueSlot, WireCodec,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Outcome of a removal request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The child was removed
    Removed,
    /// The child is a nested group; call `remove_confirmed` to drop it
    NeedsConfirmation,
    /// The child is the last one in its group and empty groups are not allowed
    Blocked,
    /// Nothing exists at the given position
    Ignored,
}

/// Edit session for one filter
#[derive(Debug, Clone)]
pub struct FilterEditor {
    root: Condition,
    catalog: FieldCatalog,
    codec: WireCodec,
    aliases: HashSet<String>,
    config: EditorConfig,
}

impl FilterEditor {
    /// Start a new, empty filter
    pub fn new(catalog: FieldCatalog, config: EditorConfig) -> Self {
        let aliases = config.computed_aliases.iter().cloned().collect();
        Self {
            root: Condition::Group(Group::empty()),
            catalog,
            codec: WireCodec::new(config.group_bean.clone()),
            aliases,
            config,
        }
    }

    /// Create a builder
    pub fn builder() -> FilterEditorBuilder {
        FilterEditorBuilder::new()
    }

    /// Current tree
    pub fn root(&self) -> &Condition {
        &self.root
    }

    /// End the session, keeping the tree
    pub fn into_root(self) -> Condition {
        self.root
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Add aliases to exclude from `required_fields`
    pub fn add_aliases<I, S>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
    }

    /// Discard the tree and start over with an empty filter
    pub fn reset(&mut self) {
        self.root = Condition::Group(Group::empty());
    }

    // ========== Loading and submitting ==========

    /// Replace the tree with a previously saved payload.
    ///
    /// Malformed input degrades to incomplete nodes. A payload whose root is
    /// not a group is wrapped in an AND group.
    pub fn load(&mut self, payload: &Value) {
        let decoded = self.codec.decode(payload);
        self.root = match decoded {
            Condition::Group(_) => decoded,
            Condition::Leaf(leaf) => {
                warn!("Saved criteria root is not a group, wrapping it in AND");
                Condition::Group(Group::new(GroupOperator::And).with_child(leaf))
            }
        };
        info!(
            "Loaded criteria referencing {} field(s)",
            self.required_fields().len()
        );
    }

    /// Replace the tree with a payload given as JSON text
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let payload: Value = serde_json::from_str(text)?;
        self.load(&payload);
        Ok(())
    }

    /// Encode the tree as-is, complete or not
    pub fn payload(&self) -> Value {
        self.codec.encode(&self.root)
    }

    /// Validate and encode the tree for submission
    pub fn submit(&self) -> Result<Value> {
        let diagnostics = diagnose(&self.root);
        if !diagnostics.is_empty() {
            warn!("Submit rejected: {} issue(s)", diagnostics.len());
            return Err(SdkError::Incomplete(diagnostics));
        }
        info!("Submitting criteria");
        Ok(self.payload())
    }

    // ========== Inspection ==========

    pub fn is_complete(&self) -> bool {
        is_complete(&self.root)
    }

    /// Reasons the tree cannot be submitted yet
    pub fn issues(&self) -> Vec<Diagnostic> {
        diagnose(&self.root)
    }

    /// Fields whose definitions must be fetched before rendering the tree
    pub fn required_fields(&self) -> Vec<String> {
        extract_field_paths(&self.root, &self.aliases)
    }

    /// Operators legal for the field selected at `path`.
    ///
    /// Empty when the path is not a leaf, no field is selected, or the field
    /// is not in the catalog.
    pub fn available_operators(&self, path: &NodePath) -> Vec<&'static OperatorDescriptor> {
        self.root
            .leaf(path)
            .and_then(|leaf| self.catalog.get(&leaf.field_name))
            .map(|field| field.operators())
            .unwrap_or_default()
    }

    // ========== Structure edits ==========

    /// Set AND/OR on the group at `path`
    pub fn set_group_operator(&mut self, path: &NodePath, operator: GroupOperator) -> bool {
        if self.root.group(path).is_none() {
            return self.ignored("set_group_operator", path);
        }
        self.root = tree::set_group_operator(&self.root, path, operator);
        debug!("Set group {} to {}", path, operator);
        true
    }

    /// Add an empty condition to the group at `group_path`, returning its path
    pub fn add_condition(&mut self, group_path: &NodePath) -> Option<NodePath> {
        self.insert(group_path, Condition::Leaf(Leaf::empty()))
    }

    /// Add a nested group (holding one empty condition), returning its path
    pub fn add_group(&mut self, group_path: &NodePath) -> Option<NodePath> {
        self.insert(group_path, Condition::Group(Group::empty()))
    }

    fn insert(&mut self, group_path: &NodePath, child: Condition) -> Option<NodePath> {
        let Some(group) = self.root.group(group_path) else {
            self.ignored("insert", group_path);
            return None;
        };
        let index = tree::insertion_index(group, &child, None);
        self.root = tree::insert_child(&self.root, group_path, child, None);
        let path = group_path.child(index);
        debug!("Inserted node at {}", path);
        Some(path)
    }

    /// Remove a child, asking for confirmation before dropping a nested group
    pub fn remove(&mut self, group_path: &NodePath, index: usize) -> Removal {
        self.remove_child(group_path, index, false)
    }

    /// Remove a child after the caller confirmed dropping a nested group
    pub fn remove_confirmed(&mut self, group_path: &NodePath, index: usize) -> Removal {
        self.remove_child(group_path, index, true)
    }

    fn remove_child(&mut self, group_path: &NodePath, index: usize, confirmed: bool) -> Removal {
        let Some((count, is_group)) = self
            .root
            .group(group_path)
            .and_then(|g| g.children.get(index).map(|c| (g.children.len(), c.is_group())))
        else {
            self.ignored("remove", &group_path.child(index));
            return Removal::Ignored;
        };

        if count == 1 && !self.config.allow_empty_groups {
            warn!("Refusing to remove the last condition of group {}", group_path);
            return Removal::Blocked;
        }
        if is_group && self.config.confirm_group_removal && !confirmed {
            return Removal::NeedsConfirmation;
        }

        self.root = tree::remove_child(&self.root, group_path, index);
        debug!("Removed node at {}", group_path.child(index));
        Removal::Removed
    }

    // ========== Leaf edits ==========

    /// Select a catalogued field for the leaf at `path`.
    ///
    /// Clears the operator and value. Returns `Ok(false)` if `path` is not a
    /// leaf.
    pub fn select_field(&mut self, path: &NodePath, alias: &str) -> Result<bool> {
        let field = self.catalog.require(alias)?;
        if self.root.leaf(path).is_none() {
            return Ok(self.ignored("select_field", path));
        }
        self.root = tree::update_leaf_field(&self.root, path, &field.alias, &field.field_type);
        debug!("Selected field '{}' at {}", alias, path);
        Ok(true)
    }

    /// Select an operator for the leaf at `path`.
    ///
    /// The operator must be legal for the selected field's type. Returns
    /// `Ok(false)` if `path` is not a leaf.
    pub fn select_operator(&mut self, path: &NodePath, key: &str) -> Result<bool> {
        let Some(leaf) = self.root.leaf(path) else {
            return Ok(self.ignored("select_operator", path));
        };
        if !leaf.has_field() {
            return Err(SdkError::NoFieldSelected(path.clone()));
        }
        let field = self.catalog.require(&leaf.field_name)?;
        let operator = check_applicable(key, field.type_key())?;

        self.root =
            tree::update_leaf_operator(&self.root, path, operator, Some(&field.field_type));
        debug!("Selected operator {} at {}", key, path);
        Ok(true)
    }

    /// Set the single value of the leaf at `path`
    pub fn set_value(&mut self, path: &NodePath, value: Value) -> bool {
        let holds_single = matches!(
            self.root.leaf(path).map(|leaf| &leaf.slot),
            Some(ValueSlot::Single(_))
        );
        if !holds_single {
            return self.ignored("set_value", path);
        }
        self.root = tree::update_leaf_value(&self.root, path, value, None);
        true
    }

    /// Set one end of the range of the leaf at `path`
    pub fn set_range_bound(&mut self, path: &NodePath, bound: RangeBound, value: Value) -> bool {
        let holds_range = matches!(
            self.root.leaf(path).map(|leaf| &leaf.slot),
            Some(ValueSlot::Range { .. })
        );
        if !holds_range {
            return self.ignored("set_range_bound", path);
        }
        self.root = tree::update_leaf_range(&self.root, path, bound, value, None);
        true
    }

    fn ignored(&self, action: &str, path: &NodePath) -> bool {
        warn!("{} ignored: nothing suitable at {}", action, path);
        false
    }
}
