//! Height-balanced (AVL) ordered container.
//!
//! [`AvlTree`] keeps unique values in comparator order and guarantees
//! `O(log n)` insert, find and remove by re-establishing the AVL height
//! invariant on the way back up every mutating descent. Bulk operations
//! select values with a predicate and hand them to a caller-owned
//! [`Collector`].
//!
//! Nodes live in an index [`Arena`](arena::Arena): child "pointers" are
//! `Option<u32>` slot indices, and rotations rewrite indices rather than
//! moving boxed nodes around.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`HeightNode`] traits, [`TraversalOrder`] |
//! [`arena`] | Slot arena with free-list reuse |
//! [`avl::balance`] | Heights, balance factors, rotations |
//! [`avl::util`] | Recursive insert / find / remove, validation, printing |
//! [`avl`] | [`AvlTree`] handle and its iterator |
//! [`util`] | Shape-only walkers (`first`, `last`, `size`, `walk`) |
//! [`collector`] | [`Collector`] trait and [`BoundedCollector`] |
//! [`error`] | [`AvlError`] |

pub mod arena;
pub mod avl;
pub mod collector;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlTree, Iter};
pub use collector::{BoundedCollector, Collector};
pub use error::AvlError;
pub use types::{Comparator, HeightNode, Node, TraversalOrder};
