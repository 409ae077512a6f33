//! Height bookkeeping, balance factors and rotations.
//!
//! Every function takes the node arena and a slot index, rewrites links in
//! place and returns the index of whatever node now roots the subtree. The
//! caller stores that index back into the child slot it descended through.
//!
//! Heights use the uniform convention `height(absent) = -1`, so a leaf has
//! height `0`, a leaf's balance factor is `0` and a node whose only child is
//! a right leaf has balance factor `+1`.

use log::trace;

use crate::arena::Arena;
use crate::types::HeightNode;

/// Height of an optional subtree, `-1` when absent.
#[inline]
pub fn height<N: HeightNode>(arena: &Arena<N>, node: Option<u32>) -> i32 {
    node.map_or(-1, |i| arena[i].height())
}

/// Recomputes the cached height of `i` from its two children.
#[inline]
pub fn update_height<N: HeightNode>(arena: &mut Arena<N>, i: u32) {
    let lh = height(arena, arena[i].l());
    let rh = height(arena, arena[i].r());
    arena[i].set_height(1 + lh.max(rh));
}

/// `height(right) - height(left)`.
#[inline]
pub fn balance_factor<N: HeightNode>(arena: &Arena<N>, i: u32) -> i32 {
    height(arena, arena[i].r()) - height(arena, arena[i].l())
}

/// Single left rotation around `root`; its right child becomes the new root.
pub fn rotate_left<N: HeightNode>(arena: &mut Arena<N>, root: u32) -> u32 {
    let pivot = arena[root]
        .r()
        .expect("left rotation requires a right child");
    let pivot_l = arena[pivot].l();

    arena[root].set_r(pivot_l);
    arena[pivot].set_l(Some(root));
    update_height(arena, root);
    update_height(arena, pivot);

    trace!("rotate left: {root} -> {pivot}");
    pivot
}

/// Single right rotation around `root`; its left child becomes the new root.
pub fn rotate_right<N: HeightNode>(arena: &mut Arena<N>, root: u32) -> u32 {
    let pivot = arena[root]
        .l()
        .expect("right rotation requires a left child");
    let pivot_r = arena[pivot].r();

    arena[root].set_l(pivot_r);
    arena[pivot].set_r(Some(root));
    update_height(arena, root);
    update_height(arena, pivot);

    trace!("rotate right: {root} -> {pivot}");
    pivot
}

/// Restores `|balance_factor| <= 1` at `i`, assuming both subtrees are
/// already balanced and `i`'s height is current.
pub fn rebalance<N: HeightNode>(arena: &mut Arena<N>, i: u32) -> u32 {
    let bf = balance_factor(arena, i);

    if bf > 1 {
        let r = arena[i].r().expect("right-heavy node has a right child");
        if balance_factor(arena, r) < 0 {
            let r = rotate_right(arena, r);
            arena[i].set_r(Some(r));
        }
        return rotate_left(arena, i);
    }

    if bf < -1 {
        let l = arena[i].l().expect("left-heavy node has a left child");
        if balance_factor(arena, l) > 0 {
            let l = rotate_left(arena, l);
            arena[i].set_l(Some(l));
        }
        return rotate_right(arena, i);
    }

    i
}

/// One step of the unwind: refresh the height of `i`, then rebalance it.
#[inline]
pub fn retrace<N: HeightNode>(arena: &mut Arena<N>, i: u32) -> u32 {
    update_height(arena, i);
    rebalance(arena, i)
}
