//! In-memory filesystem tree with a current-directory cursor.
//!
//! Nodes are stored in an arena, so the parent link of every node is a plain
//! id and removing a directory drops its whole subtree in one step.

mod error;
mod node;
mod tree;

pub use error::FileTreeError;
pub use node::{Node, NodeKind};
pub use tree::{FileTree, NodeRef};
