//! AVL tree: balance engine, recursive mutation helpers and the
//! [`AvlTree`] handle built on top of them.

#[path = "AvlTree.rs"]
pub mod avl_tree;
#[path = "AvlTreeIterator.rs"]
pub mod avl_tree_iterator;
pub mod balance;
pub mod index;
pub mod types;
pub mod util;

pub use avl_tree::AvlTree;
pub use avl_tree_iterator::Iter;
pub use index::*;
