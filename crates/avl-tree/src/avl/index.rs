pub use super::balance::{balance_factor, rebalance, rotate_left, rotate_right, update_height};
pub use super::types::AvlNode;
pub use super::util::{assert_avl_tree, find_by, insert, print, remove_by, remove_node};
