//! Tree model: arena-based tree container, nodes, and decoded payloads.

pub mod node;
pub mod tree;

pub use node::{Node, Payload};
pub use tree::{NodeIndex, PostOrderIter, PreOrderIter, Tree};
