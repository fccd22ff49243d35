//! Tree node for caller-owned storage.
//!
//! ## Design
//!
//! `AvlNode` wraps a caller payload with the structural linkage the tree
//! needs: a back-reference to the parent, two child slots indexed by
//! [`Direction`], the cached direction under which the node hangs from its
//! parent, and the height of the subtree rooted here.
//!
//! ## Storage
//!
//! Nodes live in a caller-owned arena (see [`NodeStore`](super::NodeStore)).
//! Links are arena keys (`NodeId`), not references, so the tree borrows the
//! arena only for the duration of a single operation.
//!
//! ## Sentinel
//!
//! The tree owns one extra [`Links`] value, the sentinel, whose right slot
//! holds the real root. A parent reference is therefore an [`Anchor`]: either
//! the sentinel or a node in the arena. Rotation and repair code relinks into
//! "the parent slot" without ever asking whether the node is the root.

use crate::types::Direction;

/// Key of a node in its [`NodeStore`](super::NodeStore)
pub type NodeId = usize;

// ============================================================================
// Anchor
// ============================================================================

/// Something a node can be linked under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The tree's sentinel; a node linked here is the root
    Sentinel,
    /// A node in the caller's store
    Node(NodeId),
}

impl Anchor {
    /// The node id, or `None` for the sentinel
    #[inline]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Anchor::Sentinel => None,
            Anchor::Node(id) => Some(id),
        }
    }
}

// ============================================================================
// Links
// ============================================================================

/// Structural fields shared by nodes and the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links {
    /// `None` while unlinked, and always for the sentinel
    pub(crate) parent: Option<Anchor>,
    /// Indexed by `Direction::index()`; the single source of truth for left/right
    pub(crate) children: [Option<NodeId>; 2],
    /// Slot of `parent` holding this node; meaningless while unlinked
    pub(crate) pdir: Direction,
    /// 1 for a leaf
    pub(crate) height: u32,
}

impl Default for Links {
    fn default() -> Self {
        Self::new()
    }
}

impl Links {
    /// Unlinked leaf state
    pub(crate) const fn new() -> Self {
        Self {
            parent: None,
            children: [None, None],
            pdir: Direction::Left,
            height: 1,
        }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Direction) -> Option<NodeId> {
        self.children[dir.index()]
    }

    #[inline]
    pub(crate) fn set_child_slot(&mut self, dir: Direction, child: Option<NodeId>) {
        self.children[dir.index()] = child;
    }
}

// ============================================================================
// AvlNode
// ============================================================================

/// Node stored in the caller's arena.
///
/// Contains the payload plus the linkage the tree maintains. The tree never
/// creates or destroys `AvlNode`s; it only rewrites the linkage of nodes the
/// caller hands to [`AvlTree::insert`](crate::AvlTree::insert).
#[derive(Debug, Clone)]
pub struct AvlNode<P> {
    pub(crate) links: Links,
    payload: P,
}

impl<P: Default> Default for AvlNode<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P> AvlNode<P> {
    /// Create a new, unlinked node
    ///
    /// # Example
    ///
    /// ```
    /// use sentinel_avl::AvlNode;
    ///
    /// let node = AvlNode::new(42u32);
    ///
    /// assert!(!node.is_linked());
    /// assert_eq!(node.height(), 1);
    /// assert_eq!(*node.payload(), 42);
    /// ```
    #[inline]
    pub fn new(payload: P) -> Self {
        Self {
            links: Links::new(),
            payload,
        }
    }

    /// Get the payload
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Get the payload (mutable)
    ///
    /// Changing the part of the payload the comparators look at while the
    /// node is linked breaks the ordering of the tree.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Replace the payload, returning the old one
    #[inline]
    pub fn replace_payload(&mut self, payload: P) -> P {
        std::mem::replace(&mut self.payload, payload)
    }

    /// Consume the node, returning the payload
    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Child in the given direction
    #[inline]
    pub fn child(&self, dir: Direction) -> Option<NodeId> {
        self.links.child(dir)
    }

    /// Left child
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.child(Direction::Left)
    }

    /// Right child
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.child(Direction::Right)
    }

    /// Structural parent, `None` if the node is not in a tree
    #[inline]
    pub fn parent(&self) -> Option<Anchor> {
        self.links.parent
    }

    /// Slot of the parent holding this node
    ///
    /// Only meaningful while [`is_linked`](Self::is_linked) is true.
    #[inline]
    pub fn parent_dir(&self) -> Direction {
        self.links.pdir
    }

    /// Height of the subtree rooted at this node
    #[inline]
    pub fn height(&self) -> u32 {
        self.links.height
    }

    /// Check if this node is currently linked into a tree
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.links.parent.is_some()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
