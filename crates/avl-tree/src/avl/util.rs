//! Recursive insert / find / remove over an [`AvlNode`] arena.
//!
//! Each mutating function returns the new root of the subtree it was given;
//! callers write that index back into the slot they descended through and
//! then [`retrace`] their own node, which keeps the balance invariant
//! bottom-up along the whole path.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::mem;
use std::ops::ControlFlow;

use log::trace;

use crate::arena::Arena;
use crate::types::TraversalOrder;
use crate::util::walk;

use super::balance::{balance_factor, height, retrace};
use super::types::AvlNode;

/// Attaches the already-allocated node `n` below `root` and rebalances the
/// path back up. Returns the new subtree root.
///
/// `n`'s value must not compare equal to any stored value.
pub fn insert<T, C>(
    arena: &mut Arena<AvlNode<T>>,
    root: Option<u32>,
    n: u32,
    comparator: &C,
) -> u32
where
    C: Fn(&T, &T) -> Ordering,
{
    let Some(i) = root else {
        return n;
    };

    let cmp = comparator(&arena[n].data, &arena[i].data);
    debug_assert_ne!(cmp, Ordering::Equal, "duplicate key reached insert");
    if cmp == Ordering::Less {
        let l = arena[i].l.take();
        arena[i].l = Some(insert(arena, l, n, comparator));
    } else {
        let r = arena[i].r.take();
        arena[i].r = Some(insert(arena, r, n, comparator));
    }

    retrace(arena, i)
}

/// Finds the node for which `probe` returns `Equal`.
///
/// `probe` reports how a stored value orders relative to the wanted key:
/// `Greater` sends the search left, `Less` sends it right.
pub fn find_by<T, F>(arena: &Arena<AvlNode<T>>, root: Option<u32>, probe: &mut F) -> Option<u32>
where
    F: FnMut(&T) -> Ordering,
{
    let i = root?;
    match probe(&arena[i].data) {
        Ordering::Equal => Some(i),
        Ordering::Greater => find_by(arena, arena[i].l, probe),
        Ordering::Less => find_by(arena, arena[i].r, probe),
    }
}

/// Removes the node located by `probe` (same contract as [`find_by`]).
///
/// Returns the new subtree root and the removed value, or the untouched
/// subtree and `None` when nothing matched.
pub fn remove_by<T, F>(
    arena: &mut Arena<AvlNode<T>>,
    root: Option<u32>,
    probe: &mut F,
) -> (Option<u32>, Option<T>)
where
    F: FnMut(&T) -> Ordering,
{
    remove_located(arena, root, &mut |arena: &Arena<AvlNode<T>>, i: u32| {
        probe(&arena[i].data)
    })
}

/// Removes the value currently held by node `target`, located by comparing
/// it against each node on the way down from `root`.
///
/// Lookup goes by value rather than by remembered links, so it stays correct
/// whatever rotations happened since `target` was discovered.
pub fn remove_node<T, C>(
    arena: &mut Arena<AvlNode<T>>,
    root: Option<u32>,
    target: u32,
    comparator: &C,
) -> (Option<u32>, Option<T>)
where
    C: Fn(&T, &T) -> Ordering,
{
    remove_located(arena, root, &mut |arena: &Arena<AvlNode<T>>, i: u32| {
        comparator(&arena[i].data, &arena[target].data)
    })
}

fn remove_located<T, F>(
    arena: &mut Arena<AvlNode<T>>,
    root: Option<u32>,
    locate: &mut F,
) -> (Option<u32>, Option<T>)
where
    F: FnMut(&Arena<AvlNode<T>>, u32) -> Ordering,
{
    let Some(i) = root else {
        return (None, None);
    };

    let (left, right) = (arena[i].l, arena[i].r);
    let removed = match locate(arena, i) {
        Ordering::Equal => return splice(arena, i),
        Ordering::Greater => {
            let (l, removed) = remove_located(arena, left, locate);
            arena[i].l = l;
            removed
        }
        Ordering::Less => {
            let (r, removed) = remove_located(arena, right, locate);
            arena[i].r = r;
            removed
        }
    };

    match removed {
        Some(data) => (Some(retrace(arena, i)), Some(data)),
        None => (Some(i), None),
    }
}

/// Unlinks node `i` from its subtree and returns the replacement root.
fn splice<T>(arena: &mut Arena<AvlNode<T>>, i: u32) -> (Option<u32>, Option<T>) {
    match (arena[i].l, arena[i].r) {
        (Some(_), Some(r)) => {
            // Node `i` stays in place and takes over its successor's value.
            let (r, successor) = remove_min(arena, r);
            arena[i].r = r;
            let data = mem::replace(&mut arena[i].data, successor);
            trace!("splice {i}: successor promoted");
            (Some(retrace(arena, i)), Some(data))
        }
        (l, r) => {
            let node = arena.release(i);
            trace!("splice {i}: released");
            (l.or(r), Some(node.data))
        }
    }
}

/// Removes the leftmost node under `i`, rebalancing on the way back up.
fn remove_min<T>(arena: &mut Arena<AvlNode<T>>, i: u32) -> (Option<u32>, T) {
    match arena[i].l {
        Some(l) => {
            let (l, data) = remove_min(arena, l);
            arena[i].l = l;
            (Some(retrace(arena, i)), data)
        }
        None => {
            let node = arena.release(i);
            (node.r, node.data)
        }
    }
}

/// Depth-first walk handing each stored value to `action`.
pub fn for_each<'a, T, B, F>(
    arena: &'a Arena<AvlNode<T>>,
    root: Option<u32>,
    order: TraversalOrder,
    action: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(&'a T) -> ControlFlow<B>,
{
    walk(arena, root, order, &mut move |i| action(&arena[i].data))
}

fn check_node<T, C>(
    arena: &Arena<AvlNode<T>>,
    i: u32,
    comparator: &C,
    prev: &mut Option<u32>,
) -> Result<i32, String>
where
    C: Fn(&T, &T) -> Ordering,
{
    let node = &arena[i];

    let lh = match node.l {
        Some(l) => check_node(arena, l, comparator, prev)?,
        None => -1,
    };

    if let Some(p) = *prev {
        if comparator(&arena[p].data, &node.data) != Ordering::Less {
            return Err(format!("Node order violated between nodes {p} and {i}"));
        }
    }
    *prev = Some(i);

    let rh = match node.r {
        Some(r) => check_node(arena, r, comparator, prev)?,
        None => -1,
    };

    let expected = 1 + lh.max(rh);
    if node.height != expected {
        return Err(format!(
            "Height mismatch at node {i}: expected {expected}, got {}",
            node.height
        ));
    }
    let bf = balance_factor(arena, i);
    if !(-1..=1).contains(&bf) {
        return Err(format!("AVL balance violated at node {i}: bf={bf}"));
    }

    Ok(expected)
}

/// Checks cached heights, balance factors and strict in-order ascent.
pub fn assert_avl_tree<T, C>(
    arena: &Arena<AvlNode<T>>,
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    C: Fn(&T, &T) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };
    let mut prev = None;
    check_node(arena, root, comparator, &mut prev).map(|_| ())
}

/// Debug printer for AVL trees.
pub fn print<T: Debug>(arena: &Arena<AvlNode<T>>, node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i];
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] [h={} bf={}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.height,
                balance_factor(arena, i),
                n.data
            )
        }
    }
}

/// Height of the subtree at `root`, `0` when empty.
pub fn tree_height<T>(arena: &Arena<AvlNode<T>>, root: Option<u32>) -> usize {
    height(arena, root).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn build(values: &[i32]) -> (Arena<AvlNode<i32>>, Option<u32>) {
        let mut arena = Arena::new();
        let mut root = None;
        for &v in values {
            let n = arena.alloc(AvlNode::new(v)).unwrap();
            root = Some(insert(&mut arena, root, n, &cmp));
            assert_avl_tree(&arena, root, &cmp).unwrap();
        }
        (arena, root)
    }

    fn in_order(arena: &Arena<AvlNode<i32>>, root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let _: ControlFlow<()> = for_each(arena, root, TraversalOrder::InOrder, &mut |v: &i32| {
            out.push(*v);
            ControlFlow::Continue(())
        });
        out
    }

    fn permutations(items: &[i32]) -> Vec<Vec<i32>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn every_small_insertion_order_stays_balanced() {
        for n in 1..=6 {
            let keys: Vec<i32> = (0..n).collect();
            for perm in permutations(&keys) {
                let (arena, root) = build(&perm);
                assert_eq!(in_order(&arena, root), keys);
                assert!(tree_height(&arena, root) <= 3, "{perm:?}");
            }
        }
    }

    #[test]
    fn every_single_removal_from_small_trees() {
        for n in 1..=5 {
            let keys: Vec<i32> = (0..n).collect();
            for perm in permutations(&keys) {
                for &victim in &keys {
                    let (mut arena, root) = build(&perm);
                    let (root, removed) = remove_by(&mut arena, root, &mut |v: &i32| v.cmp(&victim));
                    assert_eq!(removed, Some(victim));
                    assert_avl_tree(&arena, root, &cmp).unwrap();
                    let expected: Vec<i32> = keys.iter().copied().filter(|&k| k != victim).collect();
                    assert_eq!(in_order(&arena, root), expected);
                    assert_eq!(arena.live(), expected.len());
                }
            }
        }
    }

    #[test]
    fn every_small_removal_order_drains_tree() {
        let keys: Vec<i32> = (0..5).collect();
        for perm in permutations(&keys) {
            let (mut arena, mut root) = build(&keys);
            for &victim in &perm {
                let (r, removed) = remove_by(&mut arena, root, &mut |v: &i32| v.cmp(&victim));
                root = r;
                assert_eq!(removed, Some(victim));
                assert_avl_tree(&arena, root, &cmp).unwrap();
            }
            assert_eq!(root, None);
            assert_eq!(arena.live(), 0);
        }
    }

    #[test]
    fn removing_absent_key_is_noop() {
        let (mut arena, root) = build(&[2, 4, 6]);
        let (after, removed) = remove_by(&mut arena, root, &mut |v: &i32| v.cmp(&5));
        assert_eq!(after, root);
        assert_eq!(removed, None);
        assert_eq!(in_order(&arena, after), vec![2, 4, 6]);

        let (none, removed) = remove_by::<i32, _>(&mut arena, None, &mut |v: &i32| v.cmp(&5));
        assert_eq!((none, removed), (None, None));
    }

    #[test]
    fn two_child_removal_keeps_target_slot() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let root_idx = root.unwrap();
        let (after, removed) = remove_by(&mut arena, root, &mut |v: &i32| v.cmp(&2));
        assert_eq!(removed, Some(2));
        assert_eq!(after, Some(root_idx));
        assert_eq!(arena[root_idx].data, 3);
        assert_eq!(in_order(&arena, after), vec![1, 3]);
    }

    #[test]
    fn remove_node_follows_value_not_links() {
        let (mut arena, root) = build(&[0, 1, 2, 3, 4, 5, 6]);
        let target = find_by(&arena, root, &mut |v: &i32| v.cmp(&3)).unwrap();
        let (root, removed) = remove_node(&mut arena, root, target, &cmp);
        assert_eq!(removed, Some(3));
        assert_avl_tree(&arena, root, &cmp).unwrap();
        assert_eq!(in_order(&arena, root), vec![0, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn find_by_descends_both_ways() {
        let (arena, root) = build(&[5, 3, 8, 1, 4, 7, 9]);
        for k in [1, 3, 4, 5, 7, 8, 9] {
            let i = find_by(&arena, root, &mut |v: &i32| v.cmp(&k)).unwrap();
            assert_eq!(arena[i].data, k);
        }
        assert_eq!(find_by(&arena, root, &mut |v: &i32| v.cmp(&6)), None);
    }

    #[test]
    fn assert_avl_tree_reports_broken_height() {
        let (mut arena, root) = build(&[1, 2, 3]);
        arena[root.unwrap()].height = 5;
        let err = assert_avl_tree(&arena, root, &cmp).unwrap_err();
        assert!(err.starts_with("Height mismatch"), "{err}");
    }

    #[test]
    fn print_shows_shape() {
        let (arena, root) = build(&[1, 2, 3]);
        let out = print(&arena, root, "");
        assert!(out.starts_with("Node["));
        assert!(out.contains("{ 2 }"));
        assert!(out.contains("∅"));
    }
}
