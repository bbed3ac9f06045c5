//! Condition Tree Module
//!
//! A condition tree is a recursive union of leaf predicates and boolean
//! groups, rooted at a group:
//!
//! ```text
//! AND
//! ├── age > 18
//! └── OR
//!     ├── name == "x"
//!     └── name == "y"
//! ```
//!
//! Nodes are addressed by [`NodePath`], the sequence of child indices from the
//! root. Trees are plain values; edits go through [`crate::tree`] and produce
//! new trees.

mod path;
mod types;

pub use path::NodePath;
pub use types::{
    Condition, Group, GroupOperator, Leaf, Leaves, RangeBound, TypedValue, ValueSlot,
};

/// Leaf with every field unset and an empty single value
pub fn empty_leaf() -> Leaf {
    Leaf::empty()
}

/// AND group holding one empty leaf
pub fn empty_group() -> Group {
    Group::empty()
}
