//! Consistency-checker error kind.
//!
//! An [`InvariantViolation`] is only reachable through a caller bug: deleting
//! a node that lives in another tree, mutating a payload's key in place, or a
//! comparator that is not a consistent total order. It is reported by
//! [`AvlTree::validate`](crate::AvlTree::validate) and turned into a panic by
//! [`AvlTree::check_tree`](crate::AvlTree::check_tree). Ordinary outcomes such
//! as "not found" or "duplicate key" never use this type.

use thiserror::Error;

use crate::tree::{Anchor, NodeId};
use crate::types::Direction;

/// A broken structural invariant found while walking the tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A child's back-reference does not point at the node holding it
    #[error("node {child} is linked under {parent:?} but its parent field is {found:?}")]
    ParentLink {
        /// Node whose child slot holds `child`
        parent: Anchor,
        /// The child with the stale back-reference
        child: NodeId,
        /// What the child's parent field actually holds
        found: Option<Anchor>,
    },

    /// A child's cached parent direction disagrees with the slot holding it
    #[error("node {child} sits in the {expected:?} slot of its parent but caches {found:?}")]
    ParentDirection {
        /// The child with the stale cached direction
        child: NodeId,
        /// Slot that actually holds the child
        expected: Direction,
        /// Cached direction on the child
        found: Direction,
    },

    /// Stored height differs from the height recomputed from the children
    #[error("node {node} stores height {stored} but its subtree has height {computed}")]
    HeightMismatch {
        /// Offending node
        node: NodeId,
        /// Height field value
        stored: u32,
        /// `1 + max(child heights)`
        computed: u32,
    },

    /// Child heights differ by more than one
    #[error("node {node} is unbalanced: left height {left}, right height {right}")]
    Unbalanced {
        /// Offending node
        node: NodeId,
        /// Height of the left subtree
        left: u32,
        /// Height of the right subtree
        right: u32,
    },

    /// The root is not attached to the sentinel's right slot
    #[error("root {root} has parent {found:?} / direction {pdir:?}, expected the sentinel's right slot")]
    RootParent {
        /// Node found in the sentinel's right slot
        root: NodeId,
        /// Root's parent field
        found: Option<Anchor>,
        /// Root's cached parent direction
        pdir: Direction,
    },

    /// The sentinel has a parent or a left child
    #[error("sentinel linkage corrupted: {reason}")]
    SentinelLinkage {
        /// What was found on the sentinel
        reason: &'static str,
    },

    /// In-order neighbours are not strictly increasing under the insert comparator
    #[error("nodes {prev} and {next} are adjacent in order but do not compare as increasing")]
    OutOfOrder {
        /// Earlier node in the in-order sequence
        prev: NodeId,
        /// Node that follows `prev`
        next: NodeId,
    },
}

/// Summary of a tree that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeShape {
    /// Number of linked nodes
    pub len: usize,
    /// Height of the root (0 for an empty tree)
    pub height: u32,
}
