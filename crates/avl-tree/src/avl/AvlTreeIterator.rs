use std::iter::FusedIterator;

use crate::arena::Arena;

use super::types::AvlNode;

/// Ascending iterator over an [`AvlTree`](super::AvlTree).
///
/// Links only point downwards, so the iterator keeps the left spine of the
/// not-yet-visited part of the tree on an explicit stack.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    arena: &'a Arena<AvlNode<T>>,
    stack: Vec<u32>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a Arena<AvlNode<T>>, root: Option<u32>, len: usize) -> Self {
        let mut it = Self {
            arena,
            stack: Vec::new(),
            remaining: len,
        };
        it.push_left_spine(root);
        it
    }

    fn push_left_spine(&mut self, mut node: Option<u32>) {
        while let Some(i) = node {
            self.stack.push(i);
            node = self.arena[i].l;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let i = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[i];
        self.push_left_spine(node.r);
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
