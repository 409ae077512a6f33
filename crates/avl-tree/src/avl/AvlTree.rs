use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::iter;
use std::ops::ControlFlow;

use log::{debug, trace, warn};

use crate::arena::Arena;
use crate::collector::Collector;
use crate::error::AvlError;
use crate::types::TraversalOrder;
use crate::util::{first, last, size, walk};

use super::avl_tree_iterator::Iter;
use super::types::AvlNode;
use super::util::{
    assert_avl_tree, find_by, for_each, insert, print, remove_by, remove_node, tree_height,
};

fn default_comparator<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Height-balanced ordered container.
///
/// Values are kept in comparator order with unique keys. To store borrowed
/// data without taking ownership, instantiate `T` as a reference type.
pub struct AvlTree<T, C = fn(&T, &T) -> Ordering>
where
    C: Fn(&T, &T) -> Ordering,
{
    root: Option<u32>,
    len: usize,
    comparator: C,
    arena: Arena<AvlNode<T>>,
}

impl<T> AvlTree<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, default_comparator::<T>)
    }
}

impl<T> Default for AvlTree<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
            arena: Arena::new(),
        }
    }

    /// Like [`with_comparator`](Self::with_comparator), with room for
    /// `capacity` nodes reserved up front.
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
            arena: Arena::with_capacity(capacity),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts `data` at its ordered position.
    ///
    /// # Errors
    ///
    /// - [`AvlError::DuplicateKey`] when an equal value is already stored.
    /// - [`AvlError::AllocationFailed`] when node storage cannot grow.
    ///
    /// On error the tree is unchanged and `data` is dropped.
    pub fn insert(&mut self, data: T) -> Result<(), AvlError> {
        let cmp = &self.comparator;
        if find_by(&self.arena, self.root, &mut |x: &T| cmp(x, &data)).is_some() {
            return Err(AvlError::DuplicateKey);
        }

        let n = self.arena.alloc(AvlNode::new(data)).map_err(|err| {
            warn!("avl insert: node allocation failed at len {}", self.len);
            err
        })?;
        self.root = Some(insert(&mut self.arena, self.root, n, &self.comparator));
        self.len += 1;
        trace!("avl insert: node {n}, len {}", self.len);
        Ok(())
    }

    /// Removes the value equal to `key` and returns it. Absent keys are a
    /// no-op.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let cmp = &self.comparator;
        let (root, removed) = remove_by(&mut self.arena, self.root, &mut |x: &T| cmp(x, key));
        self.finish_remove(root, removed)
    }

    /// Removes the value for which `probe` returns `Equal`.
    ///
    /// `probe` orders a stored value against the wanted key, as in
    /// [`find_by`](Self::find_by).
    pub fn remove_by<F>(&mut self, mut probe: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let (root, removed) = remove_by(&mut self.arena, self.root, &mut probe);
        self.finish_remove(root, removed)
    }

    fn finish_remove(&mut self, root: Option<u32>, removed: Option<T>) -> Option<T> {
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
            trace!("avl remove: len {}", self.len);
        }
        removed
    }

    pub fn find(&self, key: &T) -> Option<&T> {
        let cmp = &self.comparator;
        self.find_by(|x| cmp(x, key))
    }

    /// Looks a value up with a probe instead of a full `T`.
    ///
    /// `probe` receives each stored value on the search path and reports
    /// how it orders relative to the wanted key: `Greater` continues left,
    /// `Less` continues right, `Equal` is a hit.
    pub fn find_by<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        find_by(&self.arena, self.root, &mut probe).map(|i| &self.arena[i].data)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root node: `0` for an empty tree and for a single leaf.
    pub fn height(&self) -> usize {
        tree_height(&self.arena, self.root)
    }

    /// Drops every stored value.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Smallest value.
    pub fn first(&self) -> Option<&T> {
        first(&self.arena, self.root).map(|i| &self.arena[i].data)
    }

    /// Largest value.
    pub fn last(&self) -> Option<&T> {
        last(&self.arena, self.root).map(|i| &self.arena[i].data)
    }

    /// Ascending iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root, self.len)
    }

    /// Visits every value depth-first in `order`.
    ///
    /// The first `Break` returned by `action` ends the walk and is returned
    /// as is; a walk that visits every node returns `Continue(())`.
    pub fn for_each<'a, B, F>(&'a self, order: TraversalOrder, mut action: F) -> ControlFlow<B>
    where
        F: FnMut(&'a T) -> ControlFlow<B>,
    {
        for_each(&self.arena, self.root, order, &mut action)
    }

    /// Appends every value matching `pred` to `out`, in ascending order.
    /// The tree is not modified.
    ///
    /// Returns the number of matches.
    ///
    /// # Errors
    ///
    /// [`AvlError::CollectorRejected`] if `out` refuses a value. Values
    /// pushed before the refusal stay in `out`; nothing after it is pushed.
    pub fn collect_matching<'a, P, O>(&'a self, mut pred: P, out: &mut O) -> Result<usize, AvlError>
    where
        P: FnMut(&T) -> bool,
        O: Collector<&'a T>,
    {
        let mut matched = 0;
        let mut appended = 0;
        let mut rejected = false;

        let _: ControlFlow<()> = self.for_each(TraversalOrder::InOrder, |data| {
            if pred(data) {
                matched += 1;
                if !rejected {
                    match out.push_back(data) {
                        Ok(()) => appended += 1,
                        Err(_) => rejected = true,
                    }
                }
            }
            ControlFlow::Continue(())
        });

        if rejected {
            warn!("avl collect: collector rejected value after {appended} of {matched}");
            return Err(AvlError::CollectorRejected { appended, matched });
        }
        debug!("avl collect: {matched} matches");
        Ok(matched)
    }

    /// Moves every value matching `pred` out of the tree and into `out`, in
    /// ascending order.
    ///
    /// Returns the number of values moved.
    ///
    /// # Errors
    ///
    /// - [`AvlError::AllocationFailed`] if the match or staging buffers
    ///   cannot be allocated; the tree is unchanged.
    /// - [`AvlError::CollectorRejected`] if `out` refuses a value. Values
    ///   already appended stay out of the tree; the refused value and every
    ///   later match are put back, so no value is lost.
    pub fn remove_matching<P, O>(&mut self, mut pred: P, out: &mut O) -> Result<usize, AvlError>
    where
        P: FnMut(&T) -> bool,
        O: Collector<T>,
    {
        let mut matches = Vec::new();
        matches
            .try_reserve_exact(self.len)
            .map_err(|_| AvlError::AllocationFailed)?;
        let arena = &self.arena;
        let _: ControlFlow<()> = walk(arena, self.root, TraversalOrder::InOrder, &mut |i: u32| {
            if pred(&arena[i].data) {
                matches.push(i);
            }
            ControlFlow::Continue(())
        });

        let matched = matches.len();
        let mut staged = Vec::new();
        staged
            .try_reserve_exact(matched)
            .map_err(|_| AvlError::AllocationFailed)?;

        // Largest first: removing a node only ever moves its successor's
        // value, and every pending match is smaller than the current one.
        for &i in matches.iter().rev() {
            let (root, removed) = remove_node(&mut self.arena, self.root, i, &self.comparator);
            self.root = root;
            if let Some(data) = removed {
                self.len -= 1;
                staged.push(data);
            }
        }
        staged.reverse();

        let mut pending = staged.into_iter();
        let mut appended = 0;
        while let Some(data) = pending.next() {
            if let Err(refused) = out.push_back(data) {
                warn!("avl remove_matching: collector rejected value after {appended} of {matched}");
                // Slots released above are reused, so reinsertion cannot run
                // out of storage.
                for data in iter::once(refused).chain(pending) {
                    self.insert(data)?;
                }
                return Err(AvlError::CollectorRejected { appended, matched });
            }
            appended += 1;
        }

        debug!("avl remove_matching: {matched} removed, len {}", self.len);
        Ok(matched)
    }

    /// Checks every structural invariant, describing the first violation.
    pub fn assert_valid(&self) -> Result<(), String> {
        assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.len {
            return Err(format!(
                "Size mismatch: {reachable} reachable nodes, len {}",
                self.len
            ));
        }
        if self.arena.live() != self.len {
            return Err(format!(
                "Leaked nodes: {} live slots, len {}",
                self.arena.live(),
                self.len
            ));
        }
        Ok(())
    }

    /// Multi-line dump of the tree shape with heights and balance factors.
    pub fn print(&self, tab: &str) -> String
    where
        T: Debug,
    {
        format!("AvlTree\n{tab}{}", print(&self.arena, self.root, tab))
    }
}

impl<T: Debug, C> Debug for AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
