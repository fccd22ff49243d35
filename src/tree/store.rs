//! Caller-owned node storage.
//!
//! The tree never allocates. Callers keep nodes in any arena that implements
//! [`NodeStore`]; a [`Slab`] is the natural fit since its keys stay stable
//! while other entries come and go.
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//!
//! A key handed to the tree must stay allocated for as long as the node is
//! linked. Removing a linked node from the arena is a caller bug.

use slab::Slab;

use super::node::{AvlNode, NodeId};

/// Arena holding the nodes of one or more trees
pub trait NodeStore {
    /// Payload type carried by each node
    type Payload;

    /// Get a node by id
    ///
    /// # Panics
    ///
    /// Implementations panic if `id` is not allocated
    fn node(&self, id: NodeId) -> &AvlNode<Self::Payload>;

    /// Get a node by id (mutable)
    ///
    /// # Panics
    ///
    /// Implementations panic if `id` is not allocated
    fn node_mut(&mut self, id: NodeId) -> &mut AvlNode<Self::Payload>;
}

impl<P> NodeStore for Slab<AvlNode<P>> {
    type Payload = P;

    #[inline]
    fn node(&self, id: NodeId) -> &AvlNode<P> {
        self.get(id).expect("Invalid slab key")
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut AvlNode<P> {
        self.get_mut(id).expect("Invalid slab key")
    }
}

impl<P> NodeStore for Vec<AvlNode<P>> {
    type Payload = P;

    #[inline]
    fn node(&self, id: NodeId) -> &AvlNode<P> {
        &self[id]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut AvlNode<P> {
        &mut self[id]
    }
}
