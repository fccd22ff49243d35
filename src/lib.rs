//! # Sentinel AVL
//!
//! Intrusive, height-balanced binary search tree over caller-owned nodes.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: [`Direction`] and the checker's [`InvariantViolation`]
//! - **Tree**: the sentinel-rooted [`AvlTree`], its [`AvlNode`]s and the
//!   [`NodeStore`] arena they live in
//!
//! ## Design Principles
//!
//! 1. **No allocation**: the tree never creates or frees nodes; the caller
//!    allocates a node in its arena, hands the id to `insert`, and gets it
//!    back from `delete`
//! 2. **Sentinel root**: the real root hangs from the right slot of a
//!    permanent sentinel, so no routine special-cases "no parent"
//! 3. **Direction-generic**: child slots are a two-element array indexed by
//!    [`Direction`], and every rotation/step is written once for `dir`/`!dir`
//! 4. **Synchronous**: every operation runs to completion; callers serialize
//!    access (the borrow checker already does for a single arena)
//!
//! ## Example
//!
//! ```
//! use sentinel_avl::{next, AvlNode, AvlTree};
//! use slab::Slab;
//!
//! let mut nodes = Slab::with_capacity(16);
//! let mut tree = AvlTree::ordered();
//!
//! for key in [5u32, 3, 8, 1, 4, 7, 9] {
//!     let id = nodes.insert(AvlNode::new(key));
//!     assert!(tree.insert_node(&mut nodes, id).is_none());
//! }
//!
//! // Duplicates are rejected; the existing node is returned
//! let dup = nodes.insert(AvlNode::new(4));
//! assert_eq!(tree.insert_node(&mut nodes, dup), tree.lookup(&nodes, &4));
//! nodes.remove(dup);
//!
//! let first = tree.first(&nodes).unwrap();
//! let second = next(&nodes, first).unwrap();
//! assert_eq!(*nodes[second].payload(), 3);
//!
//! tree.check_tree(&nodes);
//! ```
//!
//! ## Feature flags
//!
//! - `tracing`: emit rotation / rejection / deletion events through the
//!   `tracing` crate. Off by default and free when off.

// ============================================================================
// Module declarations
// ============================================================================

mod tracing_helpers;

/// Core data types: Direction, InvariantViolation
pub mod types;

/// Tree engine: nodes, storage, lookup, rebalancing, traversal, checking
pub mod tree;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use tree::{
    extremum, next, prev, step, Anchor, AvlNode, AvlTree, CombineFn, InsertCmp, Iter, Links,
    LookupCmp, NodeId, NodeStore,
};
pub use types::{Direction, InvariantViolation, TreeShape};
