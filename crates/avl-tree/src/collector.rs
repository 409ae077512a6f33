//! Output sequences for the bulk operations.
//!
//! A [`Collector`] is append-only from the tree's point of view: the tree
//! only ever pushes to the back and never reorders or removes.

use std::collections::{LinkedList, VecDeque};

/// Ordered, append-only output sequence.
pub trait Collector<T> {
    /// Appends `item`, or hands it back if the sequence cannot take it.
    fn push_back(&mut self, item: T) -> Result<(), T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Collector<T> for Vec<T> {
    fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.try_reserve(1).is_err() {
            return Err(item);
        }
        self.push(item);
        Ok(())
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> Collector<T> for VecDeque<T> {
    fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.try_reserve(1).is_err() {
            return Err(item);
        }
        VecDeque::push_back(self, item);
        Ok(())
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> Collector<T> for LinkedList<T> {
    fn push_back(&mut self, item: T) -> Result<(), T> {
        LinkedList::push_back(self, item);
        Ok(())
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}

/// `Vec`-backed collector that refuses items once `capacity` is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedCollector<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedCollector<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Collector<T> for BoundedCollector<T> {
    fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        Collector::push_back(&mut self.items, item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<C: Collector<i32>>(out: &mut C, n: i32) -> usize {
        (0..n).filter(|&i| out.push_back(i).is_ok()).count()
    }

    #[test]
    fn std_sequences_accept_everything() {
        let mut v = Vec::new();
        let mut d = VecDeque::new();
        let mut l = LinkedList::new();
        assert_eq!(fill(&mut v, 5), 5);
        assert_eq!(fill(&mut d, 5), 5);
        assert_eq!(fill(&mut l, 5), 5);
        assert_eq!(<Vec<i32> as Collector<i32>>::len(&v), 5);
        assert_eq!(v, vec![0, 1, 2, 3, 4]);
        assert!(d.iter().copied().eq(0..5));
        assert!(l.iter().copied().eq(0..5));
    }

    #[test]
    fn bounded_collector_hands_back_overflow() {
        let mut out = BoundedCollector::<i32>::new(2);
        assert!(<BoundedCollector<i32> as Collector<i32>>::is_empty(&out));
        assert_eq!(out.push_back(1), Ok(()));
        assert_eq!(out.push_back(2), Ok(()));
        assert!(out.is_full());
        assert_eq!(out.push_back(3), Err(3));
        assert_eq!(out.as_slice(), &[1, 2]);
        assert_eq!(out.capacity(), 2);
        assert_eq!(out.into_inner(), vec![1, 2]);
    }
}
