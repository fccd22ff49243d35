//! The tree engine.
//!
//! ## Components
//!
//! - [`AvlNode`] / [`Links`]: node model with direction-indexed child slots
//! - [`NodeStore`]: caller-owned arena the tree borrows nodes from
//! - [`AvlTree`]: sentinel, comparators, augmentation hook and context
//! - lookup: exact and closest-match descent
//! - rebalance: rotation and the bottom-up repair walk (crate-private)
//! - traverse: [`extremum`] / [`step`] / [`next`] / [`prev`]
//! - check: invariant verifier used by tests
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(log n) |
//! | Delete | O(log n) |
//! | Lookup / closest lookup | O(log n) |
//! | first / last | O(log n) |
//! | next / prev | O(log n) worst, O(1) amortised over a full walk |
//! | validate | O(n) |

mod avl;
mod check;
mod iter;
mod lookup;
mod node;
mod rebalance;
mod store;
mod traverse;

pub use avl::{AvlTree, CombineFn, InsertCmp, LookupCmp};
pub use iter::Iter;
pub use node::{Anchor, AvlNode, Links, NodeId};
pub use store::NodeStore;
pub use traverse::{extremum, next, prev, step};
