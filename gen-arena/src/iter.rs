//! Forward iterators over the occupied slots of an [`Arena`](crate::Arena)
//!
//! All of these walk the slots in ascending position order, skipping empty and retired
//! slots, and stop as soon as every occupied slot has been produced. They borrow the arena,
//! so it can't be changed while they are alive.

use core::{iter::FusedIterator, mem::MaybeUninit, slice};

use crate::{generation::Generation, index::Index, tracker::SlotStatus};

/// An iterator over the indices of an [`Arena`](crate::Arena), created by
/// [`Arena::indices`](crate::Arena::indices)
pub struct Indices<'a, G> {
    statuses: slice::Iter<'a, SlotStatus<G>>,
    remaining: usize,
}

/// An iterator over the indices and values of an [`Arena`](crate::Arena), created by
/// [`Arena::iter`](crate::Arena::iter)
pub struct Iter<'a, T, G> {
    slots: core::iter::Zip<slice::Iter<'a, SlotStatus<G>>, slice::Iter<'a, MaybeUninit<T>>>,
    remaining: usize,
}

/// An iterator over the indices and mutable values of an [`Arena`](crate::Arena), created by
/// [`Arena::iter_mut`](crate::Arena::iter_mut)
pub struct IterMut<'a, T, G> {
    slots: core::iter::Zip<slice::Iter<'a, SlotStatus<G>>, slice::IterMut<'a, MaybeUninit<T>>>,
    remaining: usize,
}

/// An iterator over the values of an [`Arena`](crate::Arena), created by
/// [`Arena::values`](crate::Arena::values)
pub struct Values<'a, T, G> {
    iter: Iter<'a, T, G>,
}

impl<'a, G> Indices<'a, G> {
    pub(crate) fn new(statuses: &'a [SlotStatus<G>], len: usize) -> Self {
        Self {
            statuses: statuses.iter(),
            remaining: len,
        }
    }
}

impl<'a, T, G> Iter<'a, T, G> {
    pub(crate) fn new(
        statuses: &'a [SlotStatus<G>],
        values: &'a [MaybeUninit<T>],
        len: usize,
    ) -> Self {
        Self {
            slots: statuses.iter().zip(values),
            remaining: len,
        }
    }
}

impl<'a, T, G> IterMut<'a, T, G> {
    pub(crate) fn new(
        statuses: &'a [SlotStatus<G>],
        values: &'a mut [MaybeUninit<T>],
        len: usize,
    ) -> Self {
        Self {
            slots: statuses.iter().zip(values),
            remaining: len,
        }
    }
}

impl<'a, T, G> Values<'a, T, G> {
    pub(crate) fn new(iter: Iter<'a, T, G>) -> Self {
        Self { iter }
    }
}

impl<G: Generation> Iterator for Indices<'_, G> {
    type Item = Index<G>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining != 0 {
            if let SlotStatus::Occupied(index) = *self.statuses.next()? {
                self.remaining -= 1;
                return Some(index);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, G: Generation> Iterator for Iter<'a, T, G> {
    type Item = (Index<G>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining != 0 {
            let (status, value) = self.slots.next()?;
            if let SlotStatus::Occupied(index) = *status {
                self.remaining -= 1;
                // SAFETY: occupied slots always hold an initialized value
                return Some((index, unsafe { value.assume_init_ref() }));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, G: Generation> Iterator for IterMut<'a, T, G> {
    type Item = (Index<G>, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining != 0 {
            let (status, value) = self.slots.next()?;
            if let SlotStatus::Occupied(index) = *status {
                self.remaining -= 1;
                // SAFETY: occupied slots always hold an initialized value
                return Some((index, unsafe { value.assume_init_mut() }));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, G: Generation> Iterator for Values<'a, T, G> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<G: Generation> ExactSizeIterator for Indices<'_, G> {}
impl<T, G: Generation> ExactSizeIterator for Iter<'_, T, G> {}
impl<T, G: Generation> ExactSizeIterator for IterMut<'_, T, G> {}
impl<T, G: Generation> ExactSizeIterator for Values<'_, T, G> {}

impl<G: Generation> FusedIterator for Indices<'_, G> {}
impl<T, G: Generation> FusedIterator for Iter<'_, T, G> {}
impl<T, G: Generation> FusedIterator for IterMut<'_, T, G> {}
impl<T, G: Generation> FusedIterator for Values<'_, T, G> {}
