//! A generational arena
//!
//! see [`Arena`] for details

use core::{fmt, mem::MaybeUninit, ops};

use grow_vec::GrowVec;

use crate::{
    error::ArenaError,
    generation::{DefaultGeneration, Generation},
    index::{access_invalid_index, Index},
    iter::{Indices, Iter, IterMut, Values},
    tracker::{SlotStatus, SlotTracker},
};

/// The number of slots [`Arena::new`] starts with
pub const DEFAULT_CAPACITY: usize = 4;

/// A generational arena
///
/// Elements live in a column of slots that only ever grows. Each insertion returns an
/// [`Index`] that pairs the slot with the slot's current generation, and every lookup checks
/// both before touching the element. Removing an element advances the slot's generation, so
/// stale indices keep failing even after the slot is reused.
///
/// The payload column and the status column are separate arrays of equal length, the status
/// column threads a free list through its empty slots. Freed slots are reused most recently
/// freed first, and when the free list runs dry the arena doubles its capacity.
///
/// ```
/// use gen_arena::{Arena, ArenaError};
///
/// let mut arena = Arena::<&str>::new();
/// let a = arena.append("a");
/// let b = arena.append("b");
///
/// assert_eq!(arena.mutate(b, "B"), Ok("b"));
/// assert_eq!(arena.remove(a), Some("a"));
/// assert_eq!(arena.get(a), None);
/// assert!(matches!(
///     arena.mutate(a, "?"),
///     Err(ArenaError::MutateOnEmptyEntry { slot: 0, generation: 0 })
/// ));
///
/// let c = arena.append("c");
/// assert_eq!(c.slot(), a.slot());
/// assert_ne!(c, a);
/// assert_eq!(arena.values().copied().collect::<Vec<_>>(), ["c", "B"]);
/// ```
pub struct Arena<T, G: Generation = DefaultGeneration> {
    values: GrowVec<MaybeUninit<T>>,
    tracker: SlotTracker<G>,
}

#[cold]
#[inline(never)]
fn growth_failed(err: ArenaError) -> ! {
    panic!("{err}: capacity overflow or out of memory")
}

#[cold]
#[inline(never)]
fn no_vacant_slot_after_growth(capacity: usize) -> ! {
    panic!("arena grew to {capacity} slots, but none of the new slots are on the free list")
}

impl<T, G: Generation> Arena<T, G> {
    /// Create an empty arena with [`DEFAULT_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty arena with `capacity` slots
    ///
    /// # Panics
    ///
    /// If the allocation fails
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| growth_failed(err))
    }

    /// Create an empty arena with `capacity` slots, reporting allocation failure
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        let mut arena = Self {
            values: GrowVec::new(),
            tracker: SlotTracker::new(),
        };
        arena.try_reserve(capacity)?;
        Ok(arena)
    }

    /// The number of elements in the arena
    #[inline]
    pub fn len(&self) -> usize {
        self.tracker.len()
    }

    /// Returns true if there are no elements in the arena
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of slots in the arena, filled or not
    ///
    /// This never decreases
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tracker.capacity()
    }

    /// Add `additional` empty slots to the arena
    ///
    /// The new slots are filled before any previously freed slot
    ///
    /// # Panics
    ///
    /// If the allocation fails
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            growth_failed(err)
        }
    }

    /// Add `additional` empty slots to the arena, reporting allocation failure
    ///
    /// On failure the arena is unchanged
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        // reserve the payload column first, so that once the tracker grows, growing the
        // payload column can't fail and both columns stay the same length
        self.values.try_reserve_exact(additional)?;
        self.tracker.try_reserve(additional)?;
        self.values.grow_with(additional, |_| MaybeUninit::uninit());
        debug_assert_eq!(self.values.len(), self.tracker.capacity());
        Ok(())
    }

    fn vacant_or_grow(&mut self) -> Result<Index<G>, ArenaError> {
        if let Some(index) = self.tracker.vacant() {
            return Ok(index);
        }

        self.try_reserve(self.capacity().max(1))?;
        match self.tracker.vacant() {
            Some(index) => Ok(index),
            None => no_vacant_slot_after_growth(self.capacity()),
        }
    }

    /// Insert a value into the arena, returning its index
    ///
    /// # Panics
    ///
    /// If the arena needs to grow and the allocation fails
    #[inline]
    pub fn append(&mut self, value: T) -> Index<G> {
        self.append_with(move |_| value)
    }

    /// Insert a value into the arena, returning its index, or an error if the arena needed to
    /// grow and couldn't
    pub fn try_append(&mut self, value: T) -> Result<Index<G>, ArenaError> {
        let index = self.vacant_or_grow()?;
        self.values[index.slot()].write(value);
        self.tracker.acquire(index);
        Ok(index)
    }

    /// Insert a value that depends on its own index into the arena
    ///
    /// If `value` panics the arena is left without the new element
    ///
    /// # Panics
    ///
    /// If the arena needs to grow and the allocation fails
    pub fn append_with(&mut self, value: impl FnOnce(Index<G>) -> T) -> Index<G> {
        let index = self
            .vacant_or_grow()
            .unwrap_or_else(|err| growth_failed(err));
        self.values[index.slot()].write(value(index));
        self.tracker.acquire(index);
        index
    }

    /// Check if `index` points to a live element
    #[inline]
    pub fn contains(&self, index: Index<G>) -> bool {
        self.tracker.contains(index)
    }

    /// Get a reference to the element associated with `index`
    ///
    /// Returns None if the index is out of bounds, points to an empty slot, or has
    /// the wrong generation
    #[inline]
    pub fn get(&self, index: Index<G>) -> Option<&T> {
        if !self.tracker.contains(index) {
            return None;
        }

        // SAFETY: the tracker ensures the slot is in bounds of both columns and that it
        // is occupied, so its value is initialized
        Some(unsafe { self.values.get_unchecked(index.slot()).assume_init_ref() })
    }

    /// Get a mutable reference to the element associated with `index`
    ///
    /// Returns None if the index is out of bounds, points to an empty slot, or has
    /// the wrong generation
    #[inline]
    pub fn get_mut(&mut self, index: Index<G>) -> Option<&mut T> {
        if !self.tracker.contains(index) {
            return None;
        }

        // SAFETY: the tracker ensures the slot is in bounds of both columns and that it
        // is occupied, so its value is initialized
        Some(unsafe { self.values.get_unchecked_mut(index.slot()).assume_init_mut() })
    }

    /// Replace the element associated with `index`, returning the old element
    ///
    /// The index stays valid, its generation isn't changed
    ///
    /// # Errors
    ///
    /// [`ArenaError::MutateOnEmptyEntry`] if `index` doesn't point to a live element, in which
    /// case `value` is dropped and the arena is unchanged
    pub fn mutate(&mut self, index: Index<G>, value: T) -> Result<T, ArenaError> {
        match self.get_mut(index) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(ArenaError::MutateOnEmptyEntry {
                slot: index.slot(),
                generation: index.generation().into(),
            }),
        }
    }

    /// Remove the element associated with `index`
    ///
    /// Returns None if the index is out of bounds, points to an empty slot, or has
    /// the wrong generation. Removing the same index twice returns None the second time.
    pub fn remove(&mut self, index: Index<G>) -> Option<T> {
        if !self.tracker.release(index) {
            return None;
        }

        // SAFETY: the slot was occupied until the release above, so it's in bounds and its
        // value is initialized. The slot is now empty, so the value won't be read again
        Some(unsafe { self.values.get_unchecked(index.slot()).assume_init_read() })
    }

    /// Remove every element
    ///
    /// Every occupied slot moves to its next generation, so no index from before the clear
    /// stays valid. Capacity is unchanged, and slots are refilled in ascending order.
    pub fn clear(&mut self) {
        for slot in 0..self.tracker.capacity() {
            let Some(index) = self.tracker.occupant(slot) else {
                continue;
            };

            self.tracker.release(index);
            // SAFETY: the slot was occupied until the release above, so its value is
            // initialized, and now that it's empty nothing else will drop it
            unsafe { self.values.get_unchecked_mut(slot).assume_init_drop() }
        }

        self.tracker.rebuild_free_list();
    }

    /// Get an iterator over the indices of all elements, in slot order
    pub fn indices(&self) -> Indices<'_, G> {
        Indices::new(self.tracker.statuses(), self.len())
    }

    /// Get an iterator over the indices and references to all elements, in slot order
    pub fn iter(&self) -> Iter<'_, T, G> {
        Iter::new(self.tracker.statuses(), &self.values, self.len())
    }

    /// Get an iterator over the indices and mut references to all elements, in slot order
    pub fn iter_mut(&mut self) -> IterMut<'_, T, G> {
        let len = self.tracker.len();
        IterMut::new(self.tracker.statuses(), &mut self.values, len)
    }

    /// Get an iterator over references to all elements, in slot order
    pub fn values(&self) -> Values<'_, T, G> {
        Values::new(self.iter())
    }
}

impl<T, G: Generation> Drop for Arena<T, G> {
    fn drop(&mut self) {
        if !core::mem::needs_drop::<T>() {
            return;
        }

        for (status, value) in self.tracker.statuses().iter().zip(self.values.iter_mut()) {
            if let SlotStatus::Occupied(_) = status {
                // SAFETY: occupied slots always hold an initialized value, and the arena
                // is going away so nothing will read it again
                unsafe { value.assume_init_drop() }
            }
        }
    }
}

impl<T, G: Generation> Default for Arena<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, G: Generation> fmt::Debug for Arena<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, G: Generation> Extend<T> for Arena<T, G> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T, G: Generation> FromIterator<T> for Arena<T, G> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arena = Self::new();
        arena.extend(iter);
        arena
    }
}

impl<'a, T, G: Generation> IntoIterator for &'a Arena<T, G> {
    type Item = (Index<G>, &'a T);
    type IntoIter = Iter<'a, T, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, G: Generation> IntoIterator for &'a mut Arena<T, G> {
    type Item = (Index<G>, &'a mut T);
    type IntoIter = IterMut<'a, T, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, G: Generation> ops::Index<Index<G>> for Arena<T, G> {
    type Output = T;

    fn index(&self, index: Index<G>) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => access_invalid_index(index, self.tracker.current_generation(index)),
        }
    }
}

impl<T, G: Generation> ops::IndexMut<Index<G>> for Arena<T, G> {
    fn index_mut(&mut self, index: Index<G>) -> &mut Self::Output {
        if !self.tracker.contains(index) {
            access_invalid_index(index, self.tracker.current_generation(index))
        }

        // SAFETY: the tracker ensures the slot is in bounds of both columns and that it
        // is occupied, so its value is initialized
        unsafe { self.values.get_unchecked_mut(index.slot()).assume_init_mut() }
    }
}
