//! see [`Index`]

use core::fmt;

use crate::generation::{DefaultGeneration, Generation};

/// A handle to an element of an [`Arena`](crate::Arena)
///
/// An index pairs the position of a slot with the generation that slot had when the element
/// was inserted. It stays valid until that element is removed (or the arena is cleared), after
/// which it will never match any element again, even if the slot is reused.
///
/// Indices are plain values: they can be copied, compared, hashed, and stored anywhere.
///
/// ```
/// use gen_arena::{Arena, Index};
///
/// let mut arena = Arena::<char>::new();
/// let a = arena.append('a');
/// assert_eq!(a, Index::new(0, 0));
///
/// arena.remove(a);
/// let b = arena.append('b');
///
/// // same slot, but a newer generation
/// assert_eq!(b, Index::new(0, 1));
/// assert_eq!(arena.get(a), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index<G = DefaultGeneration> {
    slot: usize,
    generation: G,
}

impl<G: Generation> Index<G> {
    /// Create an index from its raw parts
    #[inline]
    pub const fn new(slot: usize, generation: G) -> Self {
        Self { slot, generation }
    }

    /// The position of the slot this index points to
    #[inline]
    pub fn slot(self) -> usize {
        self.slot
    }

    /// The generation the slot must have for this index to be valid
    #[inline]
    pub fn generation(self) -> G {
        self.generation
    }
}

impl<G: Generation> fmt::Display for Index<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.slot, self.generation)
    }
}

#[cold]
#[inline(never)]
pub(crate) fn access_invalid_index<G: Generation>(index: Index<G>, found: Option<G>) -> ! {
    match found {
        Some(current) if current != index.generation => panic!(
            "tried to access arena with an expired index {index}, the slot is now at generation {current}"
        ),
        _ => panic!("tried to access an empty or out of bounds slot with index {index}"),
    }
}
