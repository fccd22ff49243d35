//! Core data types shared by every part of the tree.
//!
//! ## Types
//!
//! - [`Direction`]: Left or Right, used to index child slots symmetrically
//! - [`InvariantViolation`]: Fatal error kind reported by the consistency checker
//! - [`TreeShape`]: Summary returned by a successful validation pass

mod direction;
mod error;

// Re-export all types at module level
pub use direction::Direction;
pub use error::{InvariantViolation, TreeShape};
