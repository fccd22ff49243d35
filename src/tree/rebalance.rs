//! Height bookkeeping, rotation and the repair walk.
//!
//! ## Design
//!
//! All structural mutation goes through [`Linker`], a short-lived view that
//! borrows the tree's sentinel and the caller's store together. Parent
//! references are [`Anchor`]s, so relinking into "the slot this node used to
//! occupy" is the same code whether that slot belongs to a node or to the
//! sentinel.
//!
//! ## Repair
//!
//! After a single link or unlink, heights on the path to the sentinel can
//! change by at most one. Walking that path bottom-up and fixing each node
//! with at most one single or double rotation restores the balance
//! invariant everywhere:
//!
//! ```text
//!        n                    s                 n                    g
//!       / \                  / \               / \                 /   \
//!      s   c      ==>       a   n             s   c     ==>       s     n
//!     / \                      / \           / \                 / \   / \
//!    a   b                    b   c         a   g               a  g1 g2  c
//!                                              / \
//!   single (s leans left)                     g1  g2
//!                                          double (s leans right)
//! ```

use super::avl::CombineFn;
use super::node::{Anchor, Links, NodeId};
use super::store::NodeStore;
use super::traverse::extremum;
use crate::tracing_helpers::trace_log;
use crate::types::Direction;

/// Mutable view over the sentinel plus the node store
pub(crate) struct Linker<'a, S: NodeStore, X> {
    sentinel: &'a mut Links,
    store: &'a mut S,
    combine: Option<CombineFn<S::Payload, X>>,
    context: &'a X,
}

impl<'a, S: NodeStore, X> Linker<'a, S, X> {
    pub(crate) fn new(
        sentinel: &'a mut Links,
        store: &'a mut S,
        combine: Option<CombineFn<S::Payload, X>>,
        context: &'a X,
    ) -> Self {
        Self {
            sentinel,
            store,
            combine,
            context,
        }
    }

    // ========================================================================
    // Link access
    // ========================================================================

    #[inline]
    fn links(&self, at: Anchor) -> &Links {
        match at {
            Anchor::Sentinel => &*self.sentinel,
            Anchor::Node(id) => &self.store.node(id).links,
        }
    }

    #[inline]
    fn links_mut(&mut self, at: Anchor) -> &mut Links {
        match at {
            Anchor::Sentinel => &mut *self.sentinel,
            Anchor::Node(id) => &mut self.store.node_mut(id).links,
        }
    }

    #[inline]
    fn height(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.store.node(id).links.height)
    }

    /// Put `child` in `parent`'s `dir` slot and point it back at `parent`
    fn set_child(&mut self, parent: Anchor, dir: Direction, child: Option<NodeId>) {
        self.links_mut(parent).set_child_slot(dir, child);
        if let Some(child) = child {
            let links = &mut self.store.node_mut(child).links;
            links.parent = Some(parent);
            links.pdir = dir;
        }
    }

    /// Recompute height, then run the augmentation hook
    fn refresh(&mut self, id: NodeId) {
        let links = *self.links(Anchor::Node(id));
        let height = 1 + self
            .height(links.child(Direction::Left))
            .max(self.height(links.child(Direction::Right)));
        self.store.node_mut(id).links.height = height;

        if let Some(combine) = self.combine {
            combine(&mut *self.store, id, self.context);
        }
    }

    // ========================================================================
    // Rotation and repair
    // ========================================================================

    /// Promote `id`'s `!dir` child into `id`'s place
    ///
    /// `id` becomes the promoted node's `dir` child and inherits its inner
    /// subtree. The caller relinks the returned node into the slot `id`
    /// used to occupy. Without a `!dir` child this is a no-op returning `id`.
    fn rotate(&mut self, id: NodeId, dir: Direction) -> NodeId {
        let Some(promoted) = self.links(Anchor::Node(id)).child(!dir) else {
            return id;
        };
        let inner = self.links(Anchor::Node(promoted)).child(dir);

        self.set_child(Anchor::Node(id), !dir, inner);
        self.set_child(Anchor::Node(promoted), dir, Some(id));

        // `promoted`'s height depends on `id`'s new one
        self.refresh(id);
        self.refresh(promoted);

        trace_log!(node = id, promoted, ?dir, "rotate");
        promoted
    }

    /// Refresh `id` and rotate if its children differ in height by two
    fn repair(&mut self, id: NodeId) {
        self.refresh(id);

        let links = *self.links(Anchor::Node(id));
        let left = self.height(links.child(Direction::Left));
        let right = self.height(links.child(Direction::Right));
        let tall = if left > right + 1 {
            Direction::Left
        } else if right > left + 1 {
            Direction::Right
        } else {
            return;
        };

        let parent = links.parent.expect("repairing a node that is not linked");
        let subtree = links
            .child(tall)
            .expect("taller side of an unbalanced node is empty");

        // Inner grandchild strictly taller: straighten it out first
        let sub = *self.links(Anchor::Node(subtree));
        if self.height(sub.child(tall)) + 1 != sub.height {
            let lifted = self.rotate(subtree, tall);
            self.set_child(Anchor::Node(id), tall, Some(lifted));
        }

        let lifted = self.rotate(id, !tall);
        self.set_child(parent, links.pdir, Some(lifted));
    }

    /// Repair every node from `start` up to, not including, the sentinel
    fn repair_from(&mut self, start: Anchor) {
        let mut at = start;
        while let Anchor::Node(id) = at {
            // `id` may be rotated away; its replacement lands in this parent's slot
            let parent = self
                .links(at)
                .parent
                .expect("repair walk reached an unlinked node");
            self.repair(id);
            at = parent;
        }
    }

    // ========================================================================
    // Link / unlink
    // ========================================================================

    /// Link the unlinked leaf `id` into `parent`'s empty `dir` slot and rebalance
    pub(crate) fn attach(&mut self, parent: Anchor, dir: Direction, id: NodeId) {
        debug_assert!(self.links(parent).child(dir).is_none());
        self.set_child(parent, dir, Some(id));
        self.refresh(id);
        self.repair_from(parent);
    }

    /// Unlink `id` and rebalance; `id` is left as a fresh unlinked leaf
    pub(crate) fn detach(&mut self, id: NodeId) {
        assert!(
            self.store.node(id).is_linked(),
            "node {id} is not linked into a tree"
        );

        let replacement = loop {
            let links = *self.links(Anchor::Node(id));
            match (links.child(Direction::Left), links.child(Direction::Right)) {
                (None, right) => break right,
                (left, None) => break left,
                (Some(_), Some(right)) => {
                    let successor = extremum(&*self.store, right, Direction::Left);
                    trace_log!(node = id, successor, "swap with successor");
                    self.swap_positions(id, successor);
                }
            }
        };

        let links = *self.links(Anchor::Node(id));
        let parent = links.parent.expect("node lost its parent while unlinking");
        self.set_child(parent, links.pdir, replacement);
        self.store.node_mut(id).links = Links::new();

        self.repair_from(parent);
    }

    /// Exchange the tree positions of `a` and `b`, leaving payloads in place
    ///
    /// Handles `b` being a direct child of `a`.
    fn swap_positions(&mut self, a: NodeId, b: NodeId) {
        let swap = |id: NodeId| {
            if id == a {
                b
            } else if id == b {
                a
            } else {
                id
            }
        };
        let moved = |links: Links| Links {
            parent: links.parent.map(|p| match p {
                Anchor::Node(id) => Anchor::Node(swap(id)),
                Anchor::Sentinel => Anchor::Sentinel,
            }),
            children: links.children.map(|child| child.map(swap)),
            ..links
        };

        let old_a = *self.links(Anchor::Node(a));
        let old_b = *self.links(Anchor::Node(b));
        self.store.node_mut(a).links = moved(old_b);
        self.store.node_mut(b).links = moved(old_a);

        for id in [a, b] {
            let links = *self.links(Anchor::Node(id));
            let parent = links.parent.expect("swapping a node that is not linked");
            self.links_mut(parent).set_child_slot(links.pdir, Some(id));
            for child in links.children.into_iter().flatten() {
                self.store.node_mut(child).links.parent = Some(Anchor::Node(id));
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
