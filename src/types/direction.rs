//! Child-slot direction.
//!
//! Every structural routine in the tree (rotation, repair, stepping) is
//! written once against a `dir` and its opposite `!dir` instead of being
//! duplicated for the left and right cases.

use std::cmp::Ordering;
use std::ops::Not;

// ============================================================================
// Direction enum
// ============================================================================

/// Direction of a child slot: Left or Right
///
/// Represented as an index into a node's two-slot child array:
/// - Left = 0
/// - Right = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Smaller keys
    #[default]
    Left,
    /// Larger keys
    Right,
}

impl Direction {
    /// Both directions, in index order
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// Index of this direction in a child array
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }

    /// Convert from a child array index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns the opposite direction
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction a descent takes for a comparator result
    ///
    /// # Returns
    ///
    /// * `Some(Left)` for `Less`, `Some(Right)` for `Greater`
    /// * `None` for `Equal` (the descent stops)
    ///
    /// # Example
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use sentinel_avl::Direction;
    ///
    /// assert_eq!(Direction::from_ordering(Ordering::Less), Some(Direction::Left));
    /// assert_eq!(Direction::from_ordering(Ordering::Equal), None);
    /// ```
    #[inline]
    pub fn from_ordering(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Direction::Left),
            Ordering::Equal => None,
            Ordering::Greater => Some(Direction::Right),
        }
    }
}

impl Not for Direction {
    type Output = Direction;

    #[inline]
    fn not(self) -> Direction {
        self.opposite()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_index_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_index(dir.index()), Some(dir));
        }
        assert_eq!(Direction::from_index(2), None);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(!Direction::Left, Direction::Right);
        assert_eq!(!Direction::Right, Direction::Left);
        assert_eq!(!!Direction::Left, Direction::Left);
    }

    #[test]
    fn test_direction_from_ordering() {
        assert_eq!(Direction::from_ordering(Ordering::Greater), Some(Direction::Right));
        assert_eq!(Direction::from_ordering(Ordering::Less), Some(Direction::Left));
        assert_eq!(Direction::from_ordering(Ordering::Equal), None);
    }
}
