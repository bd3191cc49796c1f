//! Self-balancing (AVL) binary search tree over an ordered element type.
//!
//! The tree is owned through its root [`avl::Link`]. The free functions in
//! [`avl`] take a root and hand back the new one; [`AvlTree`] wraps a root and
//! does the reassignment for you.

pub mod avl;
pub mod error;

pub use avl::{AvlTree, Link, Node};
pub use error::Error;
