//! Node trait definitions.
//!
//! Nodes live in an [`Arena`](crate::arena::Arena) and refer to their
//! children by `Option<u32>` slot index. Links point downwards only: no node
//! knows its parent, so every structural algorithm is a recursive descent
//! that rewrites the child slot it came from on the way back up.

use std::cmp::Ordering;

/// Child links (`l`, `r`).
pub trait Node {
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Cached subtree height used by the balance engine.
///
/// A leaf has height `0`; an absent child counts as `-1`.
pub trait HeightNode: Node {
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
}

/// Three-way comparator defining a strict total order over stored values.
pub type Comparator<T> = dyn Fn(&T, &T) -> Ordering;

/// Depth-first visiting order used by [`AvlTree::for_each`](crate::AvlTree::for_each).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, node, right subtree: ascending order.
    InOrder,
    /// Left subtree, right subtree, then node.
    PostOrder,
}
