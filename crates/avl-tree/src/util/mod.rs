//! Shape-only helpers over any [`Node`] arena.
//!
//! Nothing here looks at node payloads: the walkers hand out slot indices and
//! leave it to the caller to read whatever it needs from the arena.

use std::ops::ControlFlow;

use crate::arena::Arena;
use crate::types::{Node, TraversalOrder};

/// Leftmost node under `root`.
pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = arena[curr].l() {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = arena[curr].r() {
        curr = r;
    }
    Some(curr)
}

fn size_inner<N: Node>(arena: &Arena<N>, root: u32) -> usize {
    1 + arena[root].l().map_or(0, |l| size_inner(arena, l))
        + arena[root].r().map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes reachable from `root`.
pub fn size<N: Node>(arena: &Arena<N>, root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Depth-first walk over slot indices.
///
/// Stops at the first `Break` returned by `visit` and propagates it; nodes
/// after that point are not visited.
pub fn walk<N, B, F>(
    arena: &Arena<N>,
    node: Option<u32>,
    order: TraversalOrder,
    visit: &mut F,
) -> ControlFlow<B>
where
    N: Node,
    F: FnMut(u32) -> ControlFlow<B>,
{
    let Some(i) = node else {
        return ControlFlow::Continue(());
    };
    let (l, r) = (arena[i].l(), arena[i].r());

    match order {
        TraversalOrder::PreOrder => {
            visit(i)?;
            walk(arena, l, order, visit)?;
            walk(arena, r, order, visit)
        }
        TraversalOrder::InOrder => {
            walk(arena, l, order, visit)?;
            visit(i)?;
            walk(arena, r, order, visit)
        }
        TraversalOrder::PostOrder => {
            walk(arena, l, order, visit)?;
            walk(arena, r, order, visit)?;
            visit(i)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::types::AvlNode;

    //     1
    //    / \
    //   0   3
    //      / \
    //     2   4
    fn sample() -> (Arena<AvlNode<i32>>, u32) {
        let mut arena = Arena::new();
        let ids: Vec<u32> = (0..5).map(|v| arena.alloc(AvlNode::new(v)).unwrap()).collect();
        arena[ids[1]].l = Some(ids[0]);
        arena[ids[1]].r = Some(ids[3]);
        arena[ids[3]].l = Some(ids[2]);
        arena[ids[3]].r = Some(ids[4]);
        (arena, ids[1])
    }

    fn order_of(order: TraversalOrder) -> Vec<i32> {
        let (arena, root) = sample();
        let mut out = Vec::new();
        let flow: ControlFlow<()> = walk(&arena, Some(root), order, &mut |i| {
            out.push(arena[i].data);
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        out
    }

    #[test]
    fn walk_orders() {
        assert_eq!(order_of(TraversalOrder::PreOrder), vec![1, 0, 3, 2, 4]);
        assert_eq!(order_of(TraversalOrder::InOrder), vec![0, 1, 2, 3, 4]);
        assert_eq!(order_of(TraversalOrder::PostOrder), vec![0, 2, 4, 3, 1]);
    }

    #[test]
    fn walk_stops_on_break() {
        let (arena, root) = sample();
        let mut seen = 0;
        let flow = walk(&arena, Some(root), TraversalOrder::InOrder, &mut |i| {
            seen += 1;
            if arena[i].data == 2 {
                ControlFlow::Break(arena[i].data)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(2));
        assert_eq!(seen, 3);
    }

    #[test]
    fn first_last_size() {
        let (arena, root) = sample();
        assert_eq!(first(&arena, Some(root)).map(|i| arena[i].data), Some(0));
        assert_eq!(last(&arena, Some(root)).map(|i| arena[i].data), Some(4));
        assert_eq!(size(&arena, Some(root)), 5);
        assert_eq!(size(&arena, None), 0);
        assert_eq!(first(&arena, None), None);
    }
}
