//! Slot arena backing tree node storage.
//!
//! Nodes are addressed by `u32` slot index. Released slots are threaded onto
//! an intrusive free list and reused before the slot vector grows, so
//! releasing never allocates and re-allocating after a release never fails.

use std::ops::{Index, IndexMut};

use crate::error::AvlError;

#[derive(Clone, Debug)]
struct Slot<N> {
    node: Option<N>,
    next_free: Option<u32>,
}

/// Contiguous node storage with free-list reuse.
#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Slot<N>>,
    free_head: Option<u32>,
    live: usize,
    /// Upper bound on `slots.len()`.
    max_slots: usize,
}

/// Every slot must be addressable by a `u32` index.
const MAX_SLOTS: usize = u32::MAX as usize;

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
            max_slots: MAX_SLOTS,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
            max_slots: MAX_SLOTS,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_slots(max_slots: usize) -> Self {
        Self {
            max_slots,
            ..Self::new()
        }
    }

    /// Stores `node` and returns its slot index.
    ///
    /// A released slot is reused when available. Growing the slot vector
    /// goes through `try_reserve`, so allocator failure is reported as
    /// [`AvlError::AllocationFailed`] and the arena is left untouched.
    pub fn alloc(&mut self, node: N) -> Result<u32, AvlError> {
        if let Some(idx) = self.free_head {
            let slot = &mut self.slots[idx as usize];
            debug_assert!(slot.node.is_none(), "free slot {idx} is occupied");
            self.free_head = slot.next_free.take();
            slot.node = Some(node);
            self.live += 1;
            return Ok(idx);
        }

        if self.slots.len() >= self.max_slots {
            return Err(AvlError::AllocationFailed);
        }
        let idx = u32::try_from(self.slots.len()).map_err(|_| AvlError::AllocationFailed)?;
        self.slots
            .try_reserve(1)
            .map_err(|_| AvlError::AllocationFailed)?;
        self.slots.push(Slot {
            node: Some(node),
            next_free: None,
        });
        self.live += 1;
        Ok(idx)
    }

    /// Takes the node out of slot `idx` and puts the slot on the free list.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already vacant.
    pub fn release(&mut self, idx: u32) -> N {
        let slot = &mut self.slots[idx as usize];
        let Some(node) = slot.node.take() else {
            panic!("release of vacant arena slot {idx}");
        };
        slot.next_free = self.free_head;
        self.free_head = Some(idx);
        self.live -= 1;
        node
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        self.slots
            .get(idx as usize)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        self.slots
            .get_mut(idx as usize)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Number of released slots waiting for reuse.
    pub fn vacant(&self) -> usize {
        self.slots.len() - self.live
    }

    /// Drops every stored node and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    fn index(&self, idx: u32) -> &N {
        match self.get(idx) {
            Some(node) => node,
            None => panic!("vacant arena slot {idx}"),
        }
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    fn index_mut(&mut self, idx: u32) -> &mut N {
        match self.get_mut(idx) {
            Some(node) => node,
            None => panic!("vacant arena slot {idx}"),
        }
    }
}
