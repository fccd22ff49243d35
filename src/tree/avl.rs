//! Sentinel-rooted AVL tree over caller-owned nodes.
//!
//! ## Architecture
//!
//! The tree itself is tiny: a sentinel [`Links`] whose right slot is the
//! root, two comparators, an optional augmentation callback and a context
//! value handed to all three. Nodes live in the caller's [`NodeStore`] and
//! every operation borrows that store for its duration only.
//!
//! - **Lookup**: descent from the root driven by the lookup comparator
//! - **Insert / delete**: link or unlink, then a bottom-up repair walk to the sentinel
//! - **Traversal**: first/last plus parent-direction stepping (see [`step`](super::step))
//!
//! ## Comparators
//!
//! The lookup comparator orders a key `K` against a payload; the insert
//! comparator orders two payloads and decides placement. They may differ,
//! for instance when placement needs a finer total order than search
//! equality.
//!
//! ## Example
//!
//! ```
//! use sentinel_avl::{AvlNode, AvlTree};
//! use slab::Slab;
//!
//! let mut nodes = Slab::new();
//! let mut tree = AvlTree::ordered();
//!
//! for key in [5u32, 3, 8, 1, 4, 7, 9] {
//!     let id = nodes.insert(AvlNode::new(0));
//!     assert!(tree.insert(&mut nodes, id, key).is_none());
//! }
//!
//! let keys: Vec<u32> = tree.iter(&nodes).map(|(_, k)| *k).collect();
//! assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! let removed = tree.delete_by_key(&mut nodes, &5).unwrap();
//! assert_eq!(*nodes.remove(removed).payload(), 5);
//! tree.check_tree(&nodes);
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

use super::node::{Links, NodeId};
use super::rebalance::Linker;
use super::store::NodeStore;
use super::traverse::extremum;
use crate::tracing_helpers::debug_log;
use crate::types::Direction;

/// Orders a lookup key against a node payload
pub type LookupCmp<K, P, X> = fn(&K, &P, &X) -> Ordering;

/// Orders a payload being inserted against a linked payload
pub type InsertCmp<P, X> = fn(&P, &P, &X) -> Ordering;

/// Augmentation hook, run on a node right after its height is recomputed
///
/// Called child-before-parent during every rotation and repair walk, so a
/// node's children already carry up-to-date aggregates when it runs.
pub type CombineFn<P, X> = fn(&mut dyn NodeStore<Payload = P>, NodeId, &X);

/// `Ord`-based comparator used by [`AvlTree::ordered`]
fn ord_cmp<P: Ord, X>(a: &P, b: &P, _context: &X) -> Ordering {
    a.cmp(b)
}

/// Intrusive AVL tree
///
/// `P` is the node payload, `K` the lookup key type (defaults to the payload)
/// and `X` the context passed to comparators and the augmentation hook.
pub struct AvlTree<P, K: ?Sized = P, X = ()> {
    /// Sentinel; its right slot holds the root, its left slot stays empty
    pub(super) dummy: Links,

    pub(super) lookup_cmp: LookupCmp<K, P, X>,

    pub(super) insert_cmp: InsertCmp<P, X>,

    pub(super) combine: Option<CombineFn<P, X>>,

    pub(super) context: X,
}

impl<P: Ord> AvlTree<P, P, ()> {
    /// Create a tree ordered by the payload's `Ord` implementation
    pub fn ordered() -> Self {
        Self::new(ord_cmp::<P, ()>, ord_cmp::<P, ()>, ())
    }
}

impl<P: Ord> Default for AvlTree<P, P, ()> {
    fn default() -> Self {
        Self::ordered()
    }
}

impl<P, K: ?Sized, X> Debug for AvlTree<P, K, X> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("root", &self.root())
            .field("augmented", &self.combine.is_some())
            .finish()
    }
}

impl<P, K: ?Sized, X> AvlTree<P, K, X> {
    /// Create an empty tree
    ///
    /// # Arguments
    ///
    /// * `lookup_cmp` - Orders a lookup key against a payload
    /// * `insert_cmp` - Orders two payloads; decides placement on insert
    /// * `combine` - Optional augmentation hook
    /// * `context` - Value passed to the comparators and the hook
    ///
    /// # Example
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use sentinel_avl::AvlTree;
    ///
    /// // Case-insensitive lookup over (name, id) payloads
    /// fn by_name(key: &str, p: &(String, u32), _: &()) -> Ordering {
    ///     key.to_lowercase().cmp(&p.0.to_lowercase())
    /// }
    /// fn by_name_then_id(a: &(String, u32), b: &(String, u32), _: &()) -> Ordering {
    ///     a.0.to_lowercase().cmp(&b.0.to_lowercase()).then(a.1.cmp(&b.1))
    /// }
    ///
    /// let tree: AvlTree<(String, u32), str> = AvlTree::init(by_name, by_name_then_id, None, ());
    /// assert!(tree.is_empty());
    /// ```
    pub fn init(
        lookup_cmp: LookupCmp<K, P, X>,
        insert_cmp: InsertCmp<P, X>,
        combine: Option<CombineFn<P, X>>,
        context: X,
    ) -> Self {
        Self {
            dummy: Links::new(),
            lookup_cmp,
            insert_cmp,
            combine,
            context,
        }
    }

    /// Create an empty tree without augmentation
    pub fn new(lookup_cmp: LookupCmp<K, P, X>, insert_cmp: InsertCmp<P, X>, context: X) -> Self {
        Self::init(lookup_cmp, insert_cmp, None, context)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Root node, or `None` for an empty tree
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.dummy.child(Direction::Right)
    }

    /// Check if the tree holds no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root().is_none()
    }

    /// Get the context value
    #[inline]
    pub fn context(&self) -> &X {
        &self.context
    }

    /// Get the context value (mutable)
    ///
    /// The context must not change in a way that reorders linked payloads.
    #[inline]
    pub fn context_mut(&mut self) -> &mut X {
        &mut self.context
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Smallest node
    pub fn first<S>(&self, store: &S) -> Option<NodeId>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        self.root().map(|root| extremum(store, root, Direction::Left))
    }

    /// Largest node
    pub fn last<S>(&self, store: &S) -> Option<NodeId>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        self.root().map(|root| extremum(store, root, Direction::Right))
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Store `payload` in node `id` and link it into the tree
    ///
    /// # Arguments
    ///
    /// * `store` - Arena holding `id`
    /// * `id` - An allocated node that is not linked into any tree
    /// * `payload` - Replaces whatever payload the node held
    ///
    /// # Returns
    ///
    /// * `None` - The node was linked
    /// * `Some(existing)` - A node comparing equal under the insert
    ///   comparator is already linked; the tree is unchanged and `id` stays
    ///   unlinked (it still holds `payload`)
    pub fn insert<S>(&mut self, store: &mut S, id: NodeId, payload: P) -> Option<NodeId>
    where
        S: NodeStore<Payload = P>,
    {
        store.node_mut(id).replace_payload(payload);
        self.insert_node(store, id)
    }

    /// Link node `id`, keeping the payload it already holds
    ///
    /// Same contract as [`insert`](Self::insert).
    pub fn insert_node<S>(&mut self, store: &mut S, id: NodeId) -> Option<NodeId>
    where
        S: NodeStore<Payload = P>,
    {
        debug_assert!(!store.node(id).is_linked(), "node {id} is already linked");
        store.node_mut(id).links = Links::new();

        let descent = {
            let payload = store.node(id).payload();
            self.descend(&*store, |other| (self.insert_cmp)(payload, other, &self.context))
        };

        if let Some(existing) = descent.found {
            debug_log!(node = id, existing, "insert rejected: duplicate key");
            return Some(existing);
        }

        self.linker(store).attach(descent.parent, descent.dir, id);
        None
    }

    /// Unlink node `id` from the tree
    ///
    /// The node keeps its payload and is left unlinked; the caller decides
    /// what to do with its storage.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not linked. Passing a node linked into a different
    /// tree corrupts both trees.
    pub fn delete<S>(&mut self, store: &mut S, id: NodeId)
    where
        S: NodeStore<Payload = P>,
    {
        self.linker(store).detach(id);
    }

    /// Look up `key` and unlink the matching node
    ///
    /// # Returns
    ///
    /// The unlinked node, or `None` (tree unchanged) if no node matches
    pub fn delete_by_key<S>(&mut self, store: &mut S, key: &K) -> Option<NodeId>
    where
        S: NodeStore<Payload = P>,
    {
        let id = self.lookup(&*store, key)?;
        self.delete(store, id);
        Some(id)
    }

    fn linker<'a, S>(&'a mut self, store: &'a mut S) -> Linker<'a, S, X>
    where
        S: NodeStore<Payload = P>,
    {
        Linker::new(&mut self.dummy, store, self.combine, &self.context)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{next, Anchor, AvlNode};
    use slab::Slab;

    fn keys(tree: &AvlTree<u32>, nodes: &Slab<AvlNode<u32>>) -> Vec<u32> {
        tree.iter(nodes).map(|(_, k)| *k).collect()
    }

    fn insert_all(tree: &mut AvlTree<u32>, nodes: &mut Slab<AvlNode<u32>>, ks: &[u32]) {
        for &k in ks {
            let id = nodes.insert(AvlNode::new(k));
            assert!(tree.insert_node(nodes, id).is_none());
            tree.check_tree(&*nodes);
        }
    }

    #[test]
    fn test_empty_tree() {
        let nodes: Slab<AvlNode<u32>> = Slab::new();
        let tree: AvlTree<u32> = AvlTree::default();

        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.first(&nodes), None);
        assert_eq!(tree.last(&nodes), None);
        assert_eq!(tree.lookup(&nodes, &1), None);
        tree.check_tree(&nodes);
    }

    #[test]
    fn test_insert_scenario_yields_sorted_order() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &[5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(keys(&tree, &nodes), vec![1, 3, 4, 5, 7, 8, 9]);
        let root = tree.root().unwrap();
        assert_eq!(*nodes[root].payload(), 5);
        assert_eq!(nodes[root].parent(), Some(Anchor::Sentinel));
        assert_eq!(nodes[root].height(), 3);
    }

    #[test]
    fn test_delete_scenario() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &[5, 3, 8, 1, 4, 7, 9]);

        let removed = tree.delete_by_key(&mut nodes, &5).unwrap();
        assert_eq!(*nodes[removed].payload(), 5);
        assert!(!nodes[removed].is_linked());
        assert_eq!(nodes[removed].left(), None);
        assert_eq!(nodes[removed].right(), None);

        assert_eq!(keys(&tree, &nodes), vec![1, 3, 4, 7, 8, 9]);
        tree.check_tree(&nodes);
        assert_eq!(tree.lookup(&nodes, &5), None);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &[2, 1, 3]);
        let existing = tree.lookup(&nodes, &3).unwrap();
        let before: Vec<_> = nodes.iter().map(|(_, n)| n.links).collect();

        let dup = nodes.insert(AvlNode::new(0));
        assert_eq!(tree.insert(&mut nodes, dup, 3), Some(existing));

        assert!(!nodes[dup].is_linked());
        assert_eq!(*nodes[dup].payload(), 3);
        let after: Vec<_> = nodes.iter().filter(|(id, _)| *id != dup).map(|(_, n)| n.links).collect();
        assert_eq!(before, after);
        assert_eq!(keys(&tree, &nodes), vec![1, 2, 3]);
    }

    #[test]
    fn test_update_in_place_through_returned_node() {
        let mut nodes = Slab::new();
        let mut tree: AvlTree<(u32, &str), u32> =
            AvlTree::new(|k, p, _| k.cmp(&p.0), |a, b, _| a.0.cmp(&b.0), ());

        let first = nodes.insert(AvlNode::new((7, "old")));
        assert!(tree.insert_node(&mut nodes, first).is_none());

        let second = nodes.insert(AvlNode::new((7, "new")));
        if let Some(existing) = tree.insert_node(&mut nodes, second) {
            let payload = nodes.remove(second).into_payload();
            nodes[existing].replace_payload(payload);
        }

        let found = tree.lookup(&nodes, &7).unwrap();
        assert_eq!(nodes[found].payload().1, "new");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_delete_absent_key_is_noop() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &[10, 20, 30]);
        let before: Vec<_> = nodes.iter().map(|(_, n)| n.links).collect();

        assert_eq!(tree.delete_by_key(&mut nodes, &25), None);

        let after: Vec<_> = nodes.iter().map(|(_, n)| n.links).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_root_with_adjacent_successor() {
        // Root 2 has right child 3 with no left child: the successor is the
        // root's direct child.
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &[2, 1, 3]);

        let root = tree.root().unwrap();
        tree.delete(&mut nodes, root);
        tree.check_tree(&nodes);
        assert_eq!(keys(&tree, &nodes), vec![1, 3]);
        assert_eq!(*nodes[tree.root().unwrap()].payload(), 3);
    }

    #[test]
    fn test_delete_keeps_node_identities() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &[50, 30, 70, 20, 40, 60, 80, 65]);
        let sixty = tree.lookup(&nodes, &60).unwrap();

        // 50 has two children; its successor 60 moves into its position.
        tree.delete_by_key(&mut nodes, &50).unwrap();
        tree.check_tree(&nodes);

        assert_eq!(tree.lookup(&nodes, &60), Some(sixty));
        assert_eq!(*nodes[sixty].payload(), 60);
        assert_eq!(next(&nodes, sixty).map(|id| *nodes[id].payload()), Some(65));
    }

    #[test]
    fn test_delete_everything() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &(0..64).collect::<Vec<_>>());

        while let Some(root) = tree.root() {
            tree.delete(&mut nodes, root);
            tree.check_tree(&nodes);
        }
        assert!(tree.is_empty());
        assert!(nodes.iter().all(|(_, n)| !n.is_linked()));
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        insert_all(&mut tree, &mut nodes, &(0..1023).collect::<Vec<_>>());

        let shape = tree.validate(&nodes).unwrap();
        assert_eq!(shape.len, 1023);
        // AVL height bound: 1.44 * log2(n + 2)
        assert!(shape.height <= 14, "height {} too large", shape.height);
    }

    #[test]
    #[should_panic(expected = "not linked")]
    fn test_delete_unlinked_node_panics() {
        let mut nodes = Slab::new();
        let mut tree: AvlTree<u32> = AvlTree::ordered();
        let id = nodes.insert(AvlNode::new(1));
        tree.delete(&mut nodes, id);
    }

    #[test]
    fn test_vec_store() {
        let mut nodes: Vec<AvlNode<i64>> = (0..10).map(|k| AvlNode::new(k * 3 - 10)).collect();
        let mut tree = AvlTree::ordered();
        for id in (0..nodes.len()).rev() {
            assert!(tree.insert_node(&mut nodes, id).is_none());
        }
        tree.check_tree(&nodes);
        let ordered: Vec<i64> = tree.iter(&nodes).map(|(_, k)| *k).collect();
        assert_eq!(ordered, (0..10).map(|k| k * 3 - 10).collect::<Vec<_>>());
    }
}
