//! Consistency checker.
//!
//! Verification only: nothing on an insert or delete path calls into this
//! module. Tests and debug tooling call [`AvlTree::check_tree`] after each
//! mutation to fail loudly on the first broken invariant.

use std::cmp::Ordering;

use super::avl::AvlTree;
use super::node::{Anchor, NodeId};
use super::store::NodeStore;
use crate::types::{Direction, InvariantViolation, TreeShape};

impl<P, K: ?Sized, X> AvlTree<P, K, X> {
    /// Walk the whole tree and report the first broken invariant
    ///
    /// Checks, at every node: children point back at it with the right cached
    /// direction, stored heights match recomputed ones, child heights differ by
    /// at most one, and in-order neighbours are strictly increasing under the
    /// insert comparator. Also checks the sentinel and the root's attachment.
    ///
    /// Recursion depth is bounded by the tree height.
    pub fn validate<S>(&self, store: &S) -> Result<TreeShape, InvariantViolation>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        if self.dummy.parent.is_some() {
            return Err(InvariantViolation::SentinelLinkage {
                reason: "sentinel has a parent",
            });
        }
        if self.dummy.child(Direction::Left).is_some() {
            return Err(InvariantViolation::SentinelLinkage {
                reason: "sentinel left slot is occupied",
            });
        }

        let Some(root) = self.root() else {
            return Ok(TreeShape::default());
        };

        let links = store.node(root).links;
        if links.parent != Some(Anchor::Sentinel) || links.pdir != Direction::Right {
            return Err(InvariantViolation::RootParent {
                root,
                found: links.parent,
                pdir: links.pdir,
            });
        }

        let mut walk = Walk {
            prev: None,
            len: 0,
        };
        let height = self.check_node(store, root, &mut walk)?;

        Ok(TreeShape {
            len: walk.len,
            height,
        })
    }

    /// Panic if any invariant is broken
    ///
    /// # Panics
    ///
    /// Panics with the [`InvariantViolation`] message. Only reachable
    /// through misuse such as deleting a node that belongs to another tree
    /// or an inconsistent comparator.
    pub fn check_tree<S>(&self, store: &S)
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        if let Err(violation) = self.validate(store) {
            panic!("AVL invariant violated: {violation}");
        }
    }

    fn check_node<S>(&self, store: &S, id: NodeId, walk: &mut Walk) -> Result<u32, InvariantViolation>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        let links = store.node(id).links;
        let mut heights = [0u32; 2];

        for dir in Direction::ALL {
            let Some(child) = links.child(dir) else {
                continue;
            };
            let child_links = store.node(child).links;
            if child_links.parent != Some(Anchor::Node(id)) {
                return Err(InvariantViolation::ParentLink {
                    parent: Anchor::Node(id),
                    child,
                    found: child_links.parent,
                });
            }
            if child_links.pdir != dir {
                return Err(InvariantViolation::ParentDirection {
                    child,
                    expected: dir,
                    found: child_links.pdir,
                });
            }

            if dir == Direction::Right {
                self.visit(store, id, walk)?;
            }
            heights[dir.index()] = self.check_node(store, child, walk)?;
        }
        if links.child(Direction::Right).is_none() {
            self.visit(store, id, walk)?;
        }

        let [left, right] = heights;
        if left.abs_diff(right) > 1 {
            return Err(InvariantViolation::Unbalanced {
                node: id,
                left,
                right,
            });
        }

        let computed = 1 + left.max(right);
        if links.height != computed {
            return Err(InvariantViolation::HeightMismatch {
                node: id,
                stored: links.height,
                computed,
            });
        }

        Ok(computed)
    }

    /// In-order visit: compare against the previous node
    fn visit<S>(&self, store: &S, id: NodeId, walk: &mut Walk) -> Result<(), InvariantViolation>
    where
        S: NodeStore<Payload = P> + ?Sized,
    {
        if let Some(prev) = walk.prev {
            let ordering = (self.insert_cmp)(
                store.node(prev).payload(),
                store.node(id).payload(),
                &self.context,
            );
            if ordering != Ordering::Less {
                return Err(InvariantViolation::OutOfOrder { prev, next: id });
            }
        }
        walk.prev = Some(id);
        walk.len += 1;
        Ok(())
    }
}

/// In-order state threaded through the recursive check
struct Walk {
    prev: Option<NodeId>,
    len: usize,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AvlNode;
    use slab::Slab;

    fn sample() -> (AvlTree<u32>, Slab<AvlNode<u32>>) {
        let mut nodes = Slab::new();
        let mut tree = AvlTree::ordered();
        for k in [5u32, 3, 8, 1, 4, 7, 9] {
            let id = nodes.insert(AvlNode::new(k));
            tree.insert_node(&mut nodes, id);
        }
        (tree, nodes)
    }

    fn find(tree: &AvlTree<u32>, nodes: &Slab<AvlNode<u32>>, key: u32) -> NodeId {
        tree.lookup(nodes, &key).unwrap()
    }

    #[test]
    fn test_valid_tree_shape() {
        let (tree, nodes) = sample();
        assert_eq!(tree.validate(&nodes), Ok(TreeShape { len: 7, height: 3 }));
    }

    #[test]
    fn test_empty_tree_shape() {
        let nodes: Slab<AvlNode<u32>> = Slab::new();
        let tree: AvlTree<u32> = AvlTree::ordered();
        assert_eq!(tree.validate(&nodes), Ok(TreeShape::default()));
    }

    #[test]
    fn test_detects_height_mismatch() {
        let (tree, mut nodes) = sample();
        let three = find(&tree, &nodes, 3);
        nodes[three].links.height = 5;

        assert_eq!(
            tree.validate(&nodes),
            Err(InvariantViolation::HeightMismatch {
                node: three,
                stored: 5,
                computed: 2
            })
        );
    }

    #[test]
    fn test_detects_stale_parent_direction() {
        let (tree, mut nodes) = sample();
        let one = find(&tree, &nodes, 1);
        nodes[one].links.pdir = Direction::Right;

        assert!(matches!(
            tree.validate(&nodes),
            Err(InvariantViolation::ParentDirection { child, .. }) if child == one
        ));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let (tree, mut nodes) = sample();
        let nine = find(&tree, &nodes, 9);
        nodes[nine].links.parent = Some(Anchor::Sentinel);

        assert!(matches!(
            tree.validate(&nodes),
            Err(InvariantViolation::ParentLink { child, .. }) if child == nine
        ));
    }

    #[test]
    fn test_detects_out_of_order_payload() {
        let (tree, mut nodes) = sample();
        let four = find(&tree, &nodes, 4);
        nodes[four].replace_payload(6);

        assert!(matches!(
            tree.validate(&nodes),
            Err(InvariantViolation::OutOfOrder { prev, .. }) if prev == four
        ));
    }

    #[test]
    fn test_detects_unbalanced_subtree() {
        // Hang a two-node chain off 9's right slot with consistent heights.
        let (tree, mut nodes) = sample();
        let nine = find(&tree, &nodes, 9);
        let ten = nodes.insert(AvlNode::new(10));
        let eleven = nodes.insert(AvlNode::new(11));
        nodes[nine].links.children = [None, Some(ten)];
        nodes[ten].links.parent = Some(Anchor::Node(nine));
        nodes[ten].links.pdir = Direction::Right;
        nodes[ten].links.children = [None, Some(eleven)];
        nodes[ten].links.height = 2;
        nodes[eleven].links.parent = Some(Anchor::Node(ten));
        nodes[eleven].links.pdir = Direction::Right;
        nodes[nine].links.height = 3;

        assert!(matches!(
            tree.validate(&nodes),
            Err(InvariantViolation::Unbalanced { node, left: 0, right: 2 }) if node == nine
        ));
    }

    #[test]
    #[should_panic(expected = "AVL invariant violated")]
    fn test_check_tree_panics_on_violation() {
        let (tree, mut nodes) = sample();
        let root = tree.root().unwrap();
        nodes[root].links.parent = None;
        tree.check_tree(&nodes);
    }
}
