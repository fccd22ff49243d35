//! Double-ended in-order iterator.

use std::iter::FusedIterator;

use super::avl::AvlTree;
use super::node::NodeId;
use super::store::NodeStore;
use super::traverse::step;
use crate::types::Direction;

/// In-order iterator over `(NodeId, &payload)`
///
/// Created by [`AvlTree::iter`]. Holds a shared borrow of the store, so the
/// tree cannot change underneath it.
pub struct Iter<'a, S: NodeStore + ?Sized> {
    store: &'a S,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl<'a, S: NodeStore + ?Sized> Iter<'a, S> {
    /// Advance one end; the two ends meeting exhausts the iterator
    fn advance(&mut self, dir: Direction) -> Option<(NodeId, &'a S::Payload)> {
        let store = self.store;
        let (id, other) = match dir {
            Direction::Right => (self.front?, self.back),
            Direction::Left => (self.back?, self.front),
        };

        if Some(id) == other {
            self.front = None;
            self.back = None;
        } else {
            let moved = step(store, id, dir);
            match dir {
                Direction::Right => self.front = moved,
                Direction::Left => self.back = moved,
            }
        }

        Some((id, store.node(id).payload()))
    }
}

impl<'a, S: NodeStore + ?Sized> Iterator for Iter<'a, S> {
    type Item = (NodeId, &'a S::Payload);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance(Direction::Right)
    }
}

impl<'a, S: NodeStore + ?Sized> DoubleEndedIterator for Iter<'a, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.advance(Direction::Left)
    }
}

impl<'a, S: NodeStore + ?Sized> FusedIterator for Iter<'a, S> {}

impl<P, K: ?Sized, X> AvlTree<P, K, X> {
    /// Iterate the linked nodes in order
    ///
    /// # Example
    ///
    /// ```
    /// use sentinel_avl::{AvlNode, AvlTree};
    /// use slab::Slab;
    ///
    /// let mut nodes = Slab::new();
    /// let mut tree = AvlTree::ordered();
    /// for word in ["pear", "apple", "fig"] {
    ///     let id = nodes.insert(AvlNode::new(word));
    ///     tree.insert_node(&mut nodes, id);
    /// }
    ///
    /// let words: Vec<&str> = tree.iter(&nodes).rev().map(|(_, w)| *w).collect();
    /// assert_eq!(words, vec!["pear", "fig", "apple"]);
    /// ```
    pub fn iter<'a, S>(&self, store: &'a S) -> Iter<'a, S>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        Iter {
            store,
            front: self.first(store),
            back: self.last(store),
        }
    }
}
