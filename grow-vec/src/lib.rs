#![no_std]
#![forbid(
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    unsafe_op_in_unsafe_fn,
    missing_docs,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]

//! # grow-vec
//!
//! [`GrowVec`] is an append-only vector. It can grow, but it has no way to
//! shrink, truncate, or remove elements, so any position that was ever in
//! bounds stays in bounds for the lifetime of the vector.
//!
//! Growth comes in two flavours, mirroring [`Vec`]:
//!
//! * [`GrowVec::grow_with`] and friends panic (or abort) if the allocator
//!   can't satisfy the request
//! * [`GrowVec::try_grow_with`] and friends report the failure as a
//!   [`TryReserveError`] and leave the vector untouched
//!
//! ```
//! use grow_vec::GrowVec;
//!
//! let mut v = GrowVec::new();
//! v.grow_with(3, |position| position * 10);
//! assert_eq!(*v, [0, 10, 20]);
//!
//! v.try_grow_with(2, |position| position * 10).unwrap();
//! assert_eq!(*v, [0, 10, 20, 30, 40]);
//! ```

extern crate alloc;

use core::ops;

use alloc::{collections::TryReserveError, vec::Vec};

/// An append only vector
pub struct GrowVec<T> {
    data: Vec<T>,
}

impl<T> GrowVec<T> {
    /// Create an empty [`GrowVec`]
    #[inline]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// see [`Vec::len`]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// see [`Vec::is_empty`]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// see [`Vec::try_reserve_exact`]
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.data.try_reserve_exact(additional)
    }

    /// Add `additional` new elements to the end of the vector, calling
    /// `make_value` with the position each new element will occupy
    ///
    /// # Panics
    ///
    /// If the new length overflows `usize` or the allocation fails
    pub fn grow_with(&mut self, additional: usize, make_value: impl FnMut(usize) -> T) {
        self.data.reserve_exact(additional);
        self.extend_reserved(additional, make_value);
    }

    /// Add `additional` new elements to the end of the vector, calling
    /// `make_value` with the position each new element will occupy
    ///
    /// If the allocation fails, the vector is left unchanged and
    /// `make_value` is never called
    pub fn try_grow_with(
        &mut self,
        additional: usize,
        make_value: impl FnMut(usize) -> T,
    ) -> Result<(), TryReserveError> {
        self.try_reserve_exact(additional)?;
        self.extend_reserved(additional, make_value);
        Ok(())
    }

    // the caller has already reserved room for `additional` elements, so
    // this never reallocates
    fn extend_reserved(&mut self, additional: usize, make_value: impl FnMut(usize) -> T) {
        let start = self.data.len();
        debug_assert!(self.data.capacity() - start >= additional);
        self.data.extend((start..start + additional).map(make_value));
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ops::Deref for GrowVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> ops::DerefMut for GrowVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::GrowVec;

    #[test]
    fn grow_with_passes_positions() {
        let mut v = GrowVec::new();
        v.grow_with(2, |position| position);
        v.grow_with(3, |position| position);
        assert_eq!(*v, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn grow_by_zero_is_a_no_op() {
        let mut v = GrowVec::<u8>::new();
        v.grow_with(0, |_| unreachable!());
        assert!(v.is_empty());
    }

    #[test]
    fn failed_growth_leaves_vector_untouched() {
        let mut v = GrowVec::new();
        v.grow_with(3, |position| position as u64 + 1);
        let result = v.try_grow_with(usize::MAX, |_| unreachable!());
        assert!(result.is_err());
        assert_eq!(*v, [1, 2, 3]);
    }

    #[test]
    fn reserved_growth_does_not_reallocate() {
        let mut v = GrowVec::<u32>::new();
        v.try_reserve_exact(4).unwrap();
        v.grow_with(1, |_| 0);
        let before = v.as_ptr();
        v.grow_with(3, |position| position as u32);
        assert_eq!(v.as_ptr(), before);
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn slice_access_through_deref() {
        let mut v = GrowVec::new();
        v.grow_with(4, |position| position as u32);
        v[2] = 20;
        assert_eq!(v[2], 20);
        assert_eq!(v.iter().sum::<u32>(), 24);
        assert_eq!(v.get(4), None);
    }
}
