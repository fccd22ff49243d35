//! In-order stepping.
//!
//! Stepping is read-only and needs only the store: a linked node knows its
//! parent and the slot it hangs from, so neither the tree nor a key is needed
//! to find its neighbours. The climb stops at the sentinel, which is what
//! ends a traversal in either direction.

use super::node::{Anchor, NodeId};
use super::store::NodeStore;
use crate::types::Direction;

/// Farthest node in direction `dir` within the subtree rooted at `id`
///
/// Returns `id` itself if it has no child on that side.
pub fn extremum<S>(store: &S, mut id: NodeId, dir: Direction) -> NodeId
where
    S: NodeStore + ?Sized,
{
    while let Some(child) = store.node(id).child(dir) {
        id = child;
    }
    id
}

/// Nearest node to `id` in direction `dir`, or `None` at either end
///
/// If `id` has a child on side `dir`, the answer is the closest node within
/// that subtree. Otherwise the climb continues while the current node hangs
/// from its parent's `dir` slot; the first ancestor reached from the
/// opposite slot is the answer. Reaching the sentinel means there is none.
///
/// An unlinked node has no neighbours.
///
/// # Example
///
/// ```
/// use sentinel_avl::{step, AvlNode, AvlTree, Direction};
/// use slab::Slab;
///
/// let mut nodes = Slab::new();
/// let mut tree = AvlTree::ordered();
/// let ids: Vec<usize> = (1..=3u32).map(|k| nodes.insert(AvlNode::new(k))).collect();
/// for &id in &ids {
///     tree.insert_node(&mut nodes, id);
/// }
///
/// assert_eq!(step(&nodes, ids[0], Direction::Right), Some(ids[1]));
/// assert_eq!(step(&nodes, ids[2], Direction::Right), None);
/// assert_eq!(step(&nodes, ids[0], Direction::Left), None);
/// ```
pub fn step<S>(store: &S, id: NodeId, dir: Direction) -> Option<NodeId>
where
    S: NodeStore + ?Sized,
{
    if let Some(child) = store.node(id).child(dir) {
        return Some(extremum(store, child, !dir));
    }

    let mut current = id;
    loop {
        let node = store.node(current);
        match node.parent()? {
            Anchor::Sentinel => return None,
            Anchor::Node(parent) if node.parent_dir() == dir => current = parent,
            Anchor::Node(parent) => return Some(parent),
        }
    }
}

/// In-order successor
#[inline]
pub fn next<S>(store: &S, id: NodeId) -> Option<NodeId>
where
    S: NodeStore + ?Sized,
{
    step(store, id, Direction::Right)
}

/// In-order predecessor
#[inline]
pub fn prev<S>(store: &S, id: NodeId) -> Option<NodeId>
where
    S: NodeStore + ?Sized,
{
    step(store, id, Direction::Left)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AvlTree;
    use crate::AvlNode;
    use slab::Slab;

    fn build(keys: &[u32]) -> (AvlTree<u32>, Slab<AvlNode<u32>>, Vec<NodeId>) {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        let mut ids = Vec::new();
        for &k in keys {
            let id = nodes.insert(AvlNode::new(k));
            assert!(tree.insert_node(&mut nodes, id).is_none());
            ids.push(id);
        }
        (tree, nodes, ids)
    }

    fn key(nodes: &Slab<AvlNode<u32>>, id: NodeId) -> u32 {
        *nodes[id].payload()
    }

    #[test]
    fn test_extremum_of_leaf_is_itself() {
        let (tree, nodes, _) = build(&[5]);
        let root = tree.root().unwrap();
        assert_eq!(extremum(&nodes, root, Direction::Left), root);
        assert_eq!(extremum(&nodes, root, Direction::Right), root);
    }

    #[test]
    fn test_forward_and_backward_walks() {
        let (tree, nodes, _) = build(&[5, 3, 8, 1, 4, 7, 9]);

        let mut forward = Vec::new();
        let mut cursor = tree.first(&nodes);
        while let Some(id) = cursor {
            forward.push(key(&nodes, id));
            cursor = next(&nodes, id);
        }
        assert_eq!(forward, vec![1, 3, 4, 5, 7, 8, 9]);

        let mut backward = Vec::new();
        let mut cursor = tree.last(&nodes);
        while let Some(id) = cursor {
            backward.push(key(&nodes, id));
            cursor = prev(&nodes, id);
        }
        forward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn test_step_across_subtree_boundary() {
        // 4 is the rightmost node of the root's left subtree; its successor
        // is found by climbing to the root.
        let (tree, nodes, ids) = build(&[5, 3, 8, 1, 4, 7, 9]);
        let four = ids[4];
        let root = tree.root().unwrap();
        assert_eq!(key(&nodes, root), 5);
        assert_eq!(next(&nodes, four), Some(root));
        assert_eq!(prev(&nodes, ids[5]), Some(root));
    }

    #[test]
    fn test_step_from_unlinked_node() {
        let mut nodes = Slab::new();
        let id = nodes.insert(AvlNode::new(1u32));
        assert_eq!(next(&nodes, id), None);
        assert_eq!(prev(&nodes, id), None);
    }
}
