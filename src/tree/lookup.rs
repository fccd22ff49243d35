//! Exact and closest-match lookup.
//!
//! Every search is one descent from the root. When the key is absent the
//! descent ends at the node the key would hang from, which is always one of
//! its two in-order neighbours, so a closest match needs at most one extra
//! [`step`] rather than a second descent.

use std::cmp::Ordering;

use super::avl::AvlTree;
use super::node::{Anchor, NodeId};
use super::store::NodeStore;
use super::traverse::step;
use crate::types::Direction;

/// Result of a descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Descent {
    /// Node comparing equal, if any
    pub found: Option<NodeId>,
    /// Where the key would be linked; the sentinel for an empty tree
    pub parent: Anchor,
    /// Slot of `parent` the key would occupy
    pub dir: Direction,
}

impl<P, K: ?Sized, X> AvlTree<P, K, X> {
    /// Descend from the root, steering with `cmp(payload)`
    pub(crate) fn descend<S, F>(&self, store: &S, mut cmp: F) -> Descent
    where
        S: NodeStore<Payload = P> + ?Sized,
        F: FnMut(&P) -> Ordering,
    {
        let mut parent = Anchor::Sentinel;
        let mut dir = Direction::Right;
        let mut current = self.root();

        while let Some(id) = current {
            let node = store.node(id);
            match Direction::from_ordering(cmp(node.payload())) {
                None => {
                    return Descent {
                        found: Some(id),
                        parent,
                        dir,
                    }
                }
                Some(towards) => {
                    parent = Anchor::Node(id);
                    dir = towards;
                    current = node.child(towards);
                }
            }
        }

        Descent {
            found: None,
            parent,
            dir,
        }
    }

    /// Find the node matching `key` under the lookup comparator
    ///
    /// # Example
    ///
    /// ```
    /// use sentinel_avl::{AvlNode, AvlTree};
    /// use slab::Slab;
    ///
    /// let mut nodes = Slab::new();
    /// let mut tree = AvlTree::ordered();
    /// let id = nodes.insert(AvlNode::new(12u64));
    /// tree.insert_node(&mut nodes, id);
    ///
    /// assert_eq!(tree.lookup(&nodes, &12), Some(id));
    /// assert_eq!(tree.lookup(&nodes, &13), None);
    /// ```
    pub fn lookup<S>(&self, store: &S, key: &K) -> Option<NodeId>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        self.descend(store, |payload| (self.lookup_cmp)(key, payload, &self.context))
            .found
    }

    /// Exact match, or else the nearest node on side `dir` of `key`
    ///
    /// `Direction::Right` gives the smallest node greater than `key`,
    /// `Direction::Left` the largest node less than it.
    pub fn lookup_closest<S>(&self, store: &S, key: &K, dir: Direction) -> Option<NodeId>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        let descent = self.descend(store, |payload| (self.lookup_cmp)(key, payload, &self.context));
        if descent.found.is_some() {
            return descent.found;
        }

        let parent = descent.parent.node()?;
        if descent.dir != dir {
            Some(parent)
        } else {
            step(store, parent, dir)
        }
    }

    /// Smallest node with key `>= key`
    ///
    /// # Example
    ///
    /// ```
    /// use sentinel_avl::{AvlNode, AvlTree};
    /// use slab::Slab;
    ///
    /// let mut nodes = Slab::new();
    /// let mut tree = AvlTree::ordered();
    /// for key in [1u32, 3, 4, 7, 8, 9] {
    ///     let id = nodes.insert(AvlNode::new(key));
    ///     tree.insert_node(&mut nodes, id);
    /// }
    ///
    /// let ge = tree.lookup_ge(&nodes, &6).map(|id| *nodes[id].payload());
    /// let le = tree.lookup_le(&nodes, &6).map(|id| *nodes[id].payload());
    /// assert_eq!(ge, Some(7));
    /// assert_eq!(le, Some(4));
    /// assert_eq!(tree.lookup_ge(&nodes, &10), None);
    /// ```
    #[inline]
    pub fn lookup_ge<S>(&self, store: &S, key: &K) -> Option<NodeId>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        self.lookup_closest(store, key, Direction::Right)
    }

    /// Largest node with key `<= key`
    #[inline]
    pub fn lookup_le<S>(&self, store: &S, key: &K) -> Option<NodeId>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        self.lookup_closest(store, key, Direction::Left)
    }
}
