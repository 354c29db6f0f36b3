//! generations harden arena indices against the ABA-problem
//!
//! see [`Generation`] for details

use core::{fmt, hash::Hash};

/// [`Generation`] counts how many times a slot has been vacated
///
/// Here's how the lifetime of a slot is modeled using [`Generation`]
///
/// * every slot starts off empty with [`Generation::FIRST`]
/// * filling an empty slot stamps its current generation into the new [`Index`](crate::Index),
///   without changing it
/// * vacating a filled slot (by removal or by clearing the arena) advances the generation via
///   [`Generation::next`]
///     * if this fails, the generation is exhausted and the slot is retired, it will never be
///       filled again. This keeps every index the arena hands out unique
///
/// The counter only ever moves forward, so an index from before a removal can never match
/// an index from after it.
///
/// This trait is sealed, it is implemented for `u8`, `u16`, `u32`, and `u64`.
/// Smaller generations make every slot smaller, but retire slots sooner.
pub trait Generation:
    Copy + Ord + Hash + fmt::Debug + fmt::Display + Into<u64> + crate::seal::Seal
{
    /// The generation of a slot that has never been filled
    const FIRST: Self;

    /// The largest generation, a slot vacated at this generation is retired
    const LAST: Self;

    /// Get the generation that follows this one
    ///
    /// Returns [`None`] if the generation has been exhausted
    fn next(self) -> Option<Self>;
}

/// The default generation type used by [`Arena`](crate::Arena) and [`Index`](crate::Index)
///
/// Slots retire after 2^32 removals, which no realistic workload reaches
pub type DefaultGeneration = u32;

macro_rules! prim {
    ($($ty:ident)*) => {$(
        impl crate::seal::Seal for $ty {}

        impl Generation for $ty {
            const FIRST: Self = 0;
            const LAST: Self = $ty::MAX;

            #[inline]
            fn next(self) -> Option<Self> {
                self.checked_add(1)
            }
        }

        const _: () = {
            #[cfg(kani)]
            #[kani::proof]
            fn $ty() {
                let g = kani::any::<$ty>();
                check_generation(g);
            }
        };
    )*};
}

prim!(u8 u16 u32 u64);

#[cfg(kani)]
fn check_generation<G: Generation>(g: G) {
    assert!(G::FIRST <= g);
    assert!(g <= G::LAST);

    match g.next() {
        Some(next) => {
            assert!(next > g);
            assert!(Into::<u64>::into(next) == Into::<u64>::into(g) + 1);
        }
        None => assert!(g == G::LAST),
    }
}

#[cfg(test)]
mod tests {
    use super::Generation;

    #[test]
    fn next_is_strictly_increasing() {
        assert_eq!(0u8.next(), Some(1));
        assert_eq!(41u32.next(), Some(42));
        assert_eq!(u16::LAST.next(), None);
        assert_eq!(u64::LAST.next(), None);
    }

    #[test]
    fn first_generation_is_zero() {
        assert_eq!(u8::FIRST, 0);
        assert_eq!(<u64 as Generation>::FIRST, 0);
    }
}
