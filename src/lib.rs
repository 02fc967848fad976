//! Multiset and signed multiset implementations backed by hashed multiplicity maps.
//!
//! ---
//!
//! [`Multiset`] is a [multiset](https://en.wikipedia.org/wiki/Multiset)
//! implementation where elements are stored as a map from element to
//! positive occurrence count:
//!  - `a -> 2`
//!  - `b -> 1`
//!
//! Entries whose multiplicity would drop to zero are removed from the map,
//! so every stored multiplicity is at least 1.
//!
//! ---
//!
//! [`SignedMultiset`] is a [hybrid set](https://en.wikipedia.org/wiki/Multiset#Generalizations)
//! generalization where multiplicities may also be negative:
//!  - `a -> 1`
//!  - `b -> -1`
//!
//! A signed multiset represents the formal difference of two multisets and
//! decomposes back into them through [`SignedMultiset::positive_part`] and
//! [`SignedMultiset::negative_part`]. Entries with multiplicity 0 are never
//! stored.
//!
//! ---
//!
//! Both containers share the [`Multiplicities`] capability, which is what
//! the binary operations on [`SignedMultiset`] accept, so a plain
//! [`Multiset`] can be used as an operand wherever a signed one can.

/// Multiset implementation where elements are stored with positive multiplicities.
pub mod multiset;

/// Signed multiset implementation where multiplicities may be negative.
pub mod signed;

#[cfg(feature = "serde")]
mod serde;

pub use hashbrown::TryReserveError;
pub use multiset::Multiset;
pub use signed::SignedMultiset;

/// Capability shared by [`Multiset`] and [`SignedMultiset`]: a finite
/// support of distinct elements, each carrying a signed multiplicity.
///
/// Binary operations that accept "a multiset or a signed multiset" as an
/// operand are generic over this trait instead of inspecting the operand's
/// concrete type.
pub trait Multiplicities<E> {
    /// Returns the signed multiplicity of `element`, or 0 if it is outside
    /// the support.
    fn multiplicity(&self, element: &E) -> isize;

    /// Calls `visit` once per distinct element of the support, stopping
    /// early if `visit` returns `false`.
    ///
    /// Returns `true` iff every call returned `true`. Visiting order is
    /// arbitrary; multiplicities passed to `visit` are never 0.
    fn visit_counts(&self, visit: impl FnMut(&E, isize) -> bool) -> bool;
}
