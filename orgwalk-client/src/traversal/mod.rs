//! Bounded breadth-first traversal of the reporting graph.

pub mod accumulator;
pub mod subtree;

pub use accumulator::{Admission, NodeAccumulator};
pub use subtree::SubtreeWalker;
