//! The slot tracker keeps the status column of an [`Arena`](crate::Arena)
//!
//! [`SlotTracker`] knows which slots are filled, which generation each slot is at, and which
//! empty slot should be filled next. It never touches the values themselves, it should be
//! paired with a payload column of the same length:
//!
//! * every time [`SlotTracker::try_reserve`] grows the tracker, the payload column must grow
//!   by the same amount
//! * a slot's payload must be initialized before [`SlotTracker::acquire`] is called for it
//! * a slot's payload must be moved out or dropped after [`SlotTracker::release`] returns true
//!   for it
//!
//! Empty slots form an intrusive free list: each [`SlotStatus::Empty`] links to the next empty
//! slot, so finding room for a new element never scans.

use alloc::collections::TryReserveError;

use grow_vec::GrowVec;

use crate::{generation::Generation, index::Index};

/// The state of a single slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SlotStatus<G> {
    /// The slot holds a value, only `index` may access it
    Occupied(Index<G>),
    /// The slot is on the free list
    Empty {
        /// the next slot on the free list
        next_free: Option<usize>,
        /// the generation the next occupant will get
        generation: G,
    },
    /// The slot's generation was exhausted, it will never be filled again
    Retired,
}

pub(crate) struct SlotTracker<G> {
    statuses: GrowVec<SlotStatus<G>>,
    free_head: Option<usize>,
    len: usize,
}

#[cold]
#[inline(never)]
fn corrupted_free_list<G: Generation>(slot: usize, status: SlotStatus<G>) -> ! {
    panic!("arena free list is corrupted: slot {slot} is on the free list, but is {status:?}")
}

impl<G: Generation> SlotTracker<G> {
    pub const fn new() -> Self {
        Self {
            statuses: GrowVec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// The number of occupied slots
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of slots, in any state
    #[inline]
    pub fn capacity(&self) -> usize {
        self.statuses.len()
    }

    #[inline]
    pub fn statuses(&self) -> &[SlotStatus<G>] {
        &self.statuses
    }

    /// Add `additional` empty slots at the end, and put them at the front of the free list,
    /// in ascending order
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let start = self.statuses.len();
        let old_head = self.free_head;
        self.statuses.try_grow_with(additional, |slot| SlotStatus::Empty {
            next_free: if slot + 1 == start + additional {
                old_head
            } else {
                Some(slot + 1)
            },
            generation: G::FIRST,
        })?;

        if additional != 0 {
            self.free_head = Some(start);
        }

        Ok(())
    }

    /// The index the next acquired slot will get, or [`None`] if the free list is empty
    #[inline]
    pub fn vacant(&self) -> Option<Index<G>> {
        let slot = self.free_head?;
        match self.statuses[slot] {
            SlotStatus::Empty { generation, .. } => Some(Index::new(slot, generation)),
            status => corrupted_free_list(slot, status),
        }
    }

    /// Mark the slot at the head of the free list as occupied by `index`
    ///
    /// `index` must have come from [`SlotTracker::vacant`], with no changes to the tracker
    /// in between
    pub fn acquire(&mut self, index: Index<G>) {
        debug_assert_eq!(self.vacant(), Some(index));

        let slot = index.slot();
        let status = &mut self.statuses[slot];
        let SlotStatus::Empty { next_free, .. } = *status else {
            corrupted_free_list(slot, *status)
        };

        *status = SlotStatus::Occupied(index);
        self.free_head = next_free;
        self.len += 1;
    }

    /// Check if `index` points to an occupied slot with a matching generation
    #[inline]
    pub fn contains(&self, index: Index<G>) -> bool {
        matches!(
            self.statuses.get(index.slot()),
            Some(SlotStatus::Occupied(current)) if *current == index
        )
    }

    /// Get the index of the element in `slot`, if there is one
    #[inline]
    pub fn occupant(&self, slot: usize) -> Option<Index<G>> {
        match self.statuses.get(slot)? {
            SlotStatus::Occupied(index) => Some(*index),
            _ => None,
        }
    }

    /// Get the generation the slot pointed to by `index` is currently at
    pub fn current_generation(&self, index: Index<G>) -> Option<G> {
        match self.statuses.get(index.slot())? {
            SlotStatus::Occupied(current) => Some(current.generation()),
            SlotStatus::Empty { generation, .. } => Some(*generation),
            SlotStatus::Retired => None,
        }
    }

    /// Vacate the slot pointed to by `index` and push it on the free list
    ///
    /// Returns false (and does nothing) if `index` doesn't point to an occupied slot
    /// with a matching generation
    pub fn release(&mut self, index: Index<G>) -> bool {
        if !self.contains(index) {
            return false;
        }

        let slot = index.slot();
        self.statuses[slot] = match index.generation().next() {
            Some(generation) => {
                let next_free = self.free_head.replace(slot);
                SlotStatus::Empty {
                    next_free,
                    generation,
                }
            }
            None => SlotStatus::Retired,
        };
        self.len -= 1;

        true
    }

    /// Re-link every empty slot into a single free list, in ascending order
    pub fn rebuild_free_list(&mut self) {
        let mut head = None;

        for (slot, status) in self.statuses.iter_mut().enumerate().rev() {
            match status {
                SlotStatus::Empty { next_free, .. } => {
                    *next_free = head;
                    head = Some(slot);
                }
                SlotStatus::Occupied(_) | SlotStatus::Retired => (),
            }
        }

        self.free_head = head;
    }

    #[cfg(test)]
    pub fn free_list(&self) -> alloc::vec::Vec<usize> {
        let mut slots = alloc::vec::Vec::new();
        let mut cursor = self.free_head;

        while let Some(slot) = cursor {
            assert!(slots.len() < self.capacity(), "free list has a cycle");
            match self.statuses[slot] {
                SlotStatus::Empty { next_free, .. } => {
                    slots.push(slot);
                    cursor = next_free;
                }
                status => corrupted_free_list(slot, status),
            }
        }

        slots
    }

    #[cfg(test)]
    pub fn assert_invariants(&self) {
        let mut free = self.free_list();
        free.sort_unstable();
        let empty: alloc::vec::Vec<usize> = self
            .statuses
            .iter()
            .enumerate()
            .filter(|(_, status)| matches!(status, SlotStatus::Empty { .. }))
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(free, empty, "the free list must hold every empty slot exactly once");

        let occupied = self
            .statuses
            .iter()
            .enumerate()
            .filter(|(slot, status)| match status {
                SlotStatus::Occupied(index) => {
                    assert_eq!(index.slot(), *slot);
                    true
                }
                _ => false,
            })
            .count();
        assert_eq!(occupied, self.len);
    }
}
