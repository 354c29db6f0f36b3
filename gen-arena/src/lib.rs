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

//! # gen-arena
//!
//! A generational arena: a growable pool of slots handing out copyable [`Index`]es that
//! detect use after removal.
//!
//! ## ABA-hardening
//!
//! The [ABA problem](https://en.wikipedia.org/wiki/ABA_problem) is where
//! you hold an index to an element that has since been removed, and its slot
//! was filled by something else, so the index looks valid but points at the wrong element
//!
//! To fix this, every slot carries a [`generation`] that advances each time the slot is
//! emptied, and every index remembers the generation it was created with. If the two don't
//! match, the index is stale and every lookup with it fails.
//!
//! More concretely,
//! ```
//! use gen_arena::{Arena, Index};
//!
//! let mut arena = Arena::<char>::new();
//! let index_a: Index = arena.append('a');
//! let index_b: Index = arena.append('b');
//!
//! assert_eq!(arena.remove(index_a), Some('a'));
//!
//! // this will be inserted into the same slot that 'a' was inserted into
//! let index_c: Index = arena.append('c');
//!
//! assert_eq!(index_a.slot(), index_c.slot());
//!
//! // even though index_a points at the same slot as index_c,
//! // the slot's generation moved on when 'a' was removed,
//! // so index_a no longer matches anything
//! assert_eq!(arena.get(index_a), None);
//! assert_eq!(arena.remove(index_a), None);
//! assert_eq!(arena[index_b], 'b');
//! ```
//!
//! Generations never wrap around. When a slot's generation reaches the maximum value of its
//! [`Generation`] type and the slot is emptied once more, the slot is retired: it stays empty
//! for the rest of the arena's life, and the arena uses other slots instead. So every index
//! an arena hands out is unique.
//!
//! The default generation type ([`DefaultGeneration`]) is `u32`, which is practically
//! inexhaustible for a single slot. Smaller types make [`Index`] smaller, but it becomes
//! possible to retire slots, so pick carefully.
//!
//! ## Storage
//!
//! Elements live in two parallel columns of the same length, one for values and one for slot
//! statuses. Empty slots form a free list threaded through the status column, so insertion,
//! access, and removal are all O(1). Freed slots are reused most recently freed first.
//!
//! Slots are never given back: the capacity of an arena only grows, doubling whenever
//! an insertion finds no empty slot. Iteration visits slots in order and stops
//! after the last element, but may still walk over empty slots before that.

extern crate alloc;

pub mod arena;
pub mod error;
pub mod generation;
pub mod index;
pub mod iter;

mod tracker;

mod seal {
    pub trait Seal {}
}

pub use arena::{Arena, DEFAULT_CAPACITY};
pub use error::ArenaError;
pub use generation::{DefaultGeneration, Generation};
pub use index::Index;
