use crate::{Multiplicities, Multiset};
use hashbrown::{hash_map, hash_map::Entry, HashMap, TryReserveError};
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt::{self, Debug, Display};
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::ops::{Mul, Neg, Sub};

/// Signed multiset ("hybrid set") implementation where multiplicities may be
/// negative.
///
/// A signed multiset represents the formal difference of two multisets: the
/// entries with positive multiplicity form one, the entries with negative
/// multiplicity the other. Entries with multiplicity 0 are never stored, so
/// the support only ever contains elements with a nonzero count.
///
/// # Examples
///
/// ```
/// use hybrid_multiset::SignedMultiset;
///
/// let set = SignedMultiset::from_parts(["a", "a"], ["a", "b"]);
///
/// assert_eq!(set.count(&"a"), 1);
/// assert_eq!(set.count(&"b"), -1);
/// assert!(set.is_proper());
/// ```
#[derive(Clone)]
pub struct SignedMultiset<E, S = RandomState> {
    counts: HashMap<E, isize, S>,
}

impl<E> SignedMultiset<E, RandomState> {
    /// Creates an empty `SignedMultiset` with a capacity of 0,
    /// so it will not allocate until it is first inserted into.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: HashMap::with_hasher(RandomState::default()),
        }
    }

    /// Creates an empty `SignedMultiset` with space for at least the
    /// specified number of distinct elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
        }
    }
}

impl<E, S> SignedMultiset<E, S> {
    /// Creates an empty `SignedMultiset` with default capacity which will use the given hash builder to hash elements.
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self {
            counts: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty `SignedMultiset` with at least the specified capacity, using the given hash builder to hash elements.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns the number of distinct elements the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.counts.capacity()
    }

    /// Returns a reference to the set's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.counts.hasher()
    }

    /// Returns the number of distinct elements in the set.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Clears the set, removing all elements. Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Returns the signed sum of all multiplicities (the net count).
    /// An empty set has cardinality 0.
    pub fn cardinality(&self) -> isize {
        self.counts.values().sum()
    }

    /// Returns the sum of the absolute values of all multiplicities (the
    /// total magnitude). An empty set has weight 0.
    pub fn weight(&self) -> usize {
        self.counts
            .values()
            .map(|multiplicity| multiplicity.unsigned_abs())
            .sum()
    }

    /// Returns `true` if every stored multiplicity is exactly +1, or every
    /// stored multiplicity is exactly -1: a "new set" in the hybrid set
    /// sense, an indicator set of uniform unit weight and single sign.
    /// The empty set is not a new set.
    pub fn is_newset(&self) -> bool {
        !self.is_empty()
            && (self.counts.values().all(|&multiplicity| multiplicity == 1)
                || self.counts.values().all(|&multiplicity| multiplicity == -1))
    }

    /// Returns `true` if at least one multiplicity is negative, i.e. the set
    /// is not representable as a plain multiset.
    pub fn is_proper(&self) -> bool {
        self.counts.values().any(|&multiplicity| multiplicity < 0)
    }

    /// Retains only the elements specified by the predicate, which is given
    /// each distinct element together with its signed multiplicity.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&E, isize) -> bool,
    {
        self.counts.retain(|element, multiplicity| f(element, *multiplicity));
    }

    /// An iterator visiting each distinct element with its signed
    /// multiplicity, in arbitrary order. The iterator element type is
    /// `(&'a E, isize)`.
    pub fn counts(&self) -> Counts<'_, E> {
        Counts {
            iter: self.counts.iter(),
        }
    }

    /// An iterator visiting each distinct element once, in arbitrary order.
    /// The iterator element type is `&'a E`.
    pub fn distinct_elements(&self) -> Distinct<'_, E> {
        Distinct {
            iter: self.counts.keys(),
        }
    }
}

impl<E, S> SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    /// Reserves capacity for at least `additional` more distinct elements.
    pub fn reserve(&mut self, additional: usize) {
        self.counts.reserve(additional);
    }

    /// Tries to reserve capacity for at least `additional` more distinct elements.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.counts.try_reserve(additional)
    }

    /// Shrinks the capacity of the set as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.counts.shrink_to_fit();
    }

    /// Shrinks the capacity of the set with a lower limit.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.counts.shrink_to(min_capacity);
    }

    /// Returns `true` if `element` has nonzero multiplicity.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.contains_key(element)
    }

    /// Returns the signed multiplicity of `element`, or 0 if it is absent.
    pub fn count<Q>(&self, element: &Q) -> isize
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.get(element).copied().unwrap_or(0)
    }

    /// Adds `multiplicity` to `element`'s count. The entry is removed when
    /// its count reaches 0; adding 0 is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::SignedMultiset;
    ///
    /// let mut set = SignedMultiset::new();
    /// set.add("a", 2);
    /// set.add("a", -2);
    ///
    /// assert!(!set.contains(&"a"));
    /// ```
    pub fn add(&mut self, element: E, multiplicity: isize) {
        if multiplicity == 0 {
            return;
        }

        match self.counts.entry(element) {
            Entry::Occupied(mut occupied) => {
                let total = *occupied.get() + multiplicity;

                if total == 0 {
                    occupied.remove();
                } else {
                    *occupied.get_mut() = total;
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(multiplicity);
            }
        }
    }

    /// Subtracts `multiplicity` from `element`'s count. The entry is removed
    /// when its count reaches 0; an absent element ends up with count
    /// `-multiplicity`, since a signed multiset can borrow below zero.
    pub fn remove(&mut self, element: E, multiplicity: isize) {
        self.add(element, -multiplicity);
    }

    /// Returns `true` if for every element of either support, with
    /// `t = self.count(e)` and `o = other.count(e)`, either `t <= o < 0` or
    /// `0 <= t <= o`.
    ///
    /// This is the pointwise hybrid set order: over nonnegative counts it is
    /// the ordinary multiset inclusion, while a negative count in `other`
    /// requires `self`'s count to be at least as negative. A positive count
    /// is never below a negative one.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::SignedMultiset;
    ///
    /// let a: SignedMultiset<&str> = [("x", 2)].into_iter().collect();
    /// let b: SignedMultiset<&str> = [("x", 3)].into_iter().collect();
    /// let c: SignedMultiset<&str> = [("x", -2)].into_iter().collect();
    ///
    /// assert!(a.is_subset(&b));
    /// assert!(!a.is_subset(&c));
    /// ```
    pub fn is_subset<O>(&self, other: &O) -> bool
    where
        O: Multiplicities<E>,
    {
        for (element, &own) in &self.counts {
            if !pointwise_le(own, other.multiplicity(element)) {
                return false;
            }
        }

        // Elements outside our support count as 0 on our side.
        other.visit_counts(|element, multiplicity| {
            self.counts.contains_key(element) || pointwise_le(0, multiplicity)
        })
    }

    /// Returns `true` if `other` is a subset of `self` under the pointwise
    /// hybrid set order of [`is_subset`](Self::is_subset).
    pub fn is_superset<O>(&self, other: &O) -> bool
    where
        O: Multiplicities<E>,
    {
        other.visit_counts(|element, multiplicity| pointwise_le(multiplicity, self.count(element)))
            && self
                .counts
                .iter()
                .all(|(element, &own)| other.multiplicity(element) != 0 || pointwise_le(0, own))
    }

    /// Returns `true` if the supports of `self` and `other` share no element.
    pub fn is_disjoint<O>(&self, other: &O) -> bool
    where
        O: Multiplicities<E>,
    {
        self.counts
            .keys()
            .all(|element| other.multiplicity(element) == 0)
    }

    /// Returns `true` if `self` is a natural subset of `other`: the support
    /// of `self` lies within the support of `other`, every positively
    /// counted element of `other` bounds `self`'s count from above, and
    /// `self` counts no negatively counted element of `other` below 0.
    pub fn is_natural_subset<O>(&self, other: &O) -> bool
    where
        O: Multiplicities<E>,
    {
        for element in self.counts.keys() {
            if other.multiplicity(element) == 0 {
                return false;
            }
        }

        other.visit_counts(|element, multiplicity| {
            let own = self.count(element);

            if multiplicity > 0 {
                0 <= own && own <= multiplicity
            } else {
                own >= 0
            }
        })
    }
}

impl<E> SignedMultiset<E, RandomState>
where
    E: Eq + Hash,
{
    /// Builds a signed multiset from two occurrence sources: every
    /// occurrence in `positive` contributes +1 to its element's count and
    /// every occurrence in `negative` contributes -1. Contributions are
    /// summed algebraically, so shared elements cancel.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::SignedMultiset;
    ///
    /// let set = SignedMultiset::from_parts(["a", "a"], ["a", "b"]);
    ///
    /// assert_eq!(set.count(&"a"), 1);
    /// assert_eq!(set.count(&"b"), -1);
    /// ```
    pub fn from_parts<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = E>,
        N: IntoIterator<Item = E>,
    {
        let mut set = Self::new();

        for element in positive {
            set.add(element, 1);
        }

        for element in negative {
            set.add(element, -1);
        }

        set
    }
}

impl<E> SignedMultiset<E, RandomState>
where
    E: Clone + Eq + Hash,
{
    /// Builds a signed multiset as the formal difference of two counted
    /// sources: each element's count is its multiplicity in `positive` minus
    /// its multiplicity in `negative`.
    pub fn from_difference<P, N>(positive: &P, negative: &N) -> Self
    where
        P: Multiplicities<E>,
        N: Multiplicities<E>,
    {
        let mut set = Self::new();

        positive.visit_counts(|element, multiplicity| {
            set.add(element.clone(), multiplicity);
            true
        });

        negative.visit_counts(|element, multiplicity| {
            set.add(element.clone(), -multiplicity);
            true
        });

        set
    }
}

impl<E, S> SignedMultiset<E, S>
where
    E: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    /// Returns the multiset of all positively counted elements, with their
    /// counts as multiplicities. The result is an independent copy.
    pub fn positive_part(&self) -> Multiset<E, S> {
        let mut part = Multiset::with_hasher(self.hasher().clone());

        for (element, &multiplicity) in &self.counts {
            if multiplicity > 0 {
                part.insert_many(element.clone(), multiplicity as usize);
            }
        }

        part
    }

    /// Returns the multiset of all negatively counted elements, with the
    /// absolute values of their counts as multiplicities. The result is an
    /// independent copy.
    pub fn negative_part(&self) -> Multiset<E, S> {
        let mut part = Multiset::with_hasher(self.hasher().clone());

        for (element, &multiplicity) in &self.counts {
            if multiplicity < 0 {
                part.insert_many(element.clone(), multiplicity.unsigned_abs());
            }
        }

        part
    }

    /// Returns a new signed multiset where each element's count is its count
    /// in `self` minus its count in `other`, over the union of the supports.
    /// Counts that reach 0 are pruned. `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::SignedMultiset;
    ///
    /// let a: SignedMultiset<&str> = [("x", 1)].into_iter().collect();
    /// let b: SignedMultiset<&str> = [("x", 1), ("y", 2)].into_iter().collect();
    /// let difference = a.subtract(&b);
    ///
    /// assert!(!difference.contains(&"x"));
    /// assert_eq!(difference.count(&"y"), -2);
    /// ```
    #[must_use]
    pub fn subtract<O>(&self, other: &O) -> Self
    where
        O: Multiplicities<E>,
    {
        let mut result = self.clone();

        other.visit_counts(|element, multiplicity| {
            result.add(element.clone(), -multiplicity);
            true
        });

        result
    }

    /// Alias for [`subtract`](Self::subtract), kept under its traditional
    /// hybrid set name. Note that despite the name this operation subtracts
    /// `other`'s counts.
    #[must_use]
    pub fn combine<O>(&self, other: &O) -> Self
    where
        O: Multiplicities<E>,
    {
        self.subtract(other)
    }

    /// Alias for [`subtract`](Self::subtract), kept under its traditional
    /// hybrid set name.
    #[must_use]
    pub fn part<O>(&self, other: &O) -> Self
    where
        O: Multiplicities<E>,
    {
        self.subtract(other)
    }

    /// Returns a new signed multiset where each element's count is the sum
    /// of its counts in `self` and `other`; the additive counterpart of
    /// [`subtract`](Self::subtract). Counts that cancel to 0 are pruned.
    #[must_use]
    pub fn merge<O>(&self, other: &O) -> Self
    where
        O: Multiplicities<E>,
    {
        let mut result = self.clone();

        other.visit_counts(|element, multiplicity| {
            result.add(element.clone(), multiplicity);
            true
        });

        result
    }

    /// Returns `other - self` if `self` is a natural subset of `other`
    /// under [`is_natural_subset`](Self::is_natural_subset), `None` otherwise.
    pub fn complement<O>(&self, other: &O) -> Option<Self>
    where
        O: Multiplicities<E>,
    {
        if !self.is_natural_subset(other) {
            return None;
        }

        let mut result = Self::with_hasher(self.hasher().clone());

        other.visit_counts(|element, multiplicity| {
            result.add(element.clone(), multiplicity);
            true
        });

        for (element, &multiplicity) in &self.counts {
            result.add(element.clone(), -multiplicity);
        }

        Some(result)
    }

    /// Returns a new signed multiset with every count multiplied by
    /// `factor`. A negative factor flips all signs; a factor of 0 yields the
    /// empty set, since zero counts are never stored. `self` is left
    /// untouched.
    #[must_use]
    pub fn scale(&self, factor: isize) -> Self {
        if factor == 0 {
            return Self::with_hasher(self.hasher().clone());
        }

        let mut result = self.clone();

        for multiplicity in result.counts.values_mut() {
            *multiplicity *= factor;
        }

        result
    }
}

impl<E, S> Multiplicities<E> for SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn multiplicity(&self, element: &E) -> isize {
        self.count(element)
    }

    fn visit_counts(&self, mut visit: impl FnMut(&E, isize) -> bool) -> bool {
        for (element, &multiplicity) in &self.counts {
            if !visit(element, multiplicity) {
                return false;
            }
        }

        true
    }
}

impl<E, S> From<Multiset<E, S>> for SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher + Clone,
{
    /// Embeds a multiset as a signed multiset with the same, all positive,
    /// counts.
    fn from(set: Multiset<E, S>) -> Self {
        let mut counts =
            HashMap::with_capacity_and_hasher(set.distinct_len(), set.hasher().clone());

        for (element, multiplicity) in set.counts {
            counts.insert(element, multiplicity as isize);
        }

        Self { counts }
    }
}

impl<E, S> FromIterator<E> for SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Builds a signed multiset where each element's count is its number of
    /// occurrences in the iterator.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::with_hasher(Default::default());

        for element in iter {
            set.add(element, 1);
        }

        set
    }
}

impl<E, S> FromIterator<(E, isize)> for SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Builds a signed multiset from (element, count) pairs. Counts of the
    /// same element are summed algebraically; entries that end up at 0 are
    /// dropped.
    fn from_iter<I: IntoIterator<Item = (E, isize)>>(iter: I) -> Self {
        let mut set = Self::with_hasher(Default::default());

        for (element, multiplicity) in iter {
            set.add(element, multiplicity);
        }

        set
    }
}

impl<E, S> Default for SignedMultiset<E, S>
where
    S: Default,
{
    fn default() -> Self {
        SignedMultiset {
            counts: HashMap::default(),
        }
    }
}

impl<E, S> PartialEq for SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<E, S> Eq for SignedMultiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
}

impl<E, S> Debug for SignedMultiset<E, S>
where
    E: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts.iter()).finish()
    }
}

impl<E, S> Display for SignedMultiset<E, S>
where
    E: Display,
{
    /// Renders the positive and negative parts separated by `|`, each
    /// element repeated per the absolute value of its count, e.g.
    /// `{a, a|b}`, or `{|}` when empty. Element order is arbitrary; this is
    /// a display format, not a serialization format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        self.fmt_half(f, |multiplicity| multiplicity > 0)?;
        f.write_str("|")?;
        self.fmt_half(f, |multiplicity| multiplicity < 0)?;
        f.write_str("}")
    }
}

impl<E, S> SignedMultiset<E, S>
where
    E: Display,
{
    fn fmt_half(
        &self,
        f: &mut fmt::Formatter<'_>,
        half: impl Fn(isize) -> bool,
    ) -> fmt::Result {
        let mut first = true;

        for (element, &multiplicity) in &self.counts {
            if !half(multiplicity) {
                continue;
            }

            for _ in 0..multiplicity.unsigned_abs() {
                if !first {
                    f.write_str(", ")?;
                }

                write!(f, "{element}")?;
                first = false;
            }
        }

        Ok(())
    }
}

impl<E, S> Neg for SignedMultiset<E, S> {
    type Output = SignedMultiset<E, S>;

    /// Flips the sign of every count.
    fn neg(mut self) -> SignedMultiset<E, S> {
        for multiplicity in self.counts.values_mut() {
            *multiplicity = -*multiplicity;
        }

        self
    }
}

impl<E, S> Sub for &SignedMultiset<E, S>
where
    E: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    type Output = SignedMultiset<E, S>;

    fn sub(self, rhs: Self) -> SignedMultiset<E, S> {
        self.subtract(rhs)
    }
}

impl<E, S> std::ops::Add for &SignedMultiset<E, S>
where
    E: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    type Output = SignedMultiset<E, S>;

    fn add(self, rhs: Self) -> SignedMultiset<E, S> {
        self.merge(rhs)
    }
}

impl<E, S> Mul<isize> for &SignedMultiset<E, S>
where
    E: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    type Output = SignedMultiset<E, S>;

    fn mul(self, factor: isize) -> SignedMultiset<E, S> {
        self.scale(factor)
    }
}

/// The pointwise hybrid set order on a single pair of counts.
const fn pointwise_le(own: isize, other: isize) -> bool {
    (own <= other && other < 0) || (0 <= own && own <= other)
}

/// An iterator over the distinct elements of a `SignedMultiset` paired with
/// their signed multiplicities.
pub struct Counts<'a, E> {
    iter: hash_map::Iter<'a, E, isize>,
}

impl<E> Clone for Counts<'_, E> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, E> Iterator for Counts<'a, E> {
    type Item = (&'a E, isize);

    fn next(&mut self) -> Option<(&'a E, isize)> {
        self.iter
            .next()
            .map(|(element, &multiplicity)| (element, multiplicity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<E> ExactSizeIterator for Counts<'_, E> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<E> FusedIterator for Counts<'_, E> {}

/// An iterator over the distinct elements of a `SignedMultiset`.
pub struct Distinct<'a, E> {
    iter: hash_map::Keys<'a, E, isize>,
}

impl<E> Clone for Distinct<'_, E> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, E> Iterator for Distinct<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<E> ExactSizeIterator for Distinct<'_, E> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<E> FusedIterator for Distinct<'_, E> {}

#[cfg(test)]
mod tests {
    use super::SignedMultiset;
    use crate::Multiset;

    fn counts<const N: usize>(pairs: [(&'static str, isize); N]) -> SignedMultiset<&'static str> {
        pairs.into_iter().collect()
    }

    #[test]
    fn from_parts_sums_contributions() {
        let set = SignedMultiset::from_parts(["a", "a"], ["a", "b"]);

        assert_eq!(set.count(&"a"), 1);
        assert_eq!(set.count(&"b"), -1);
        assert_eq!(set.distinct_len(), 2);
        assert!(set.is_proper());

        // Mixed signs: +1 and -1 entries do not make a new set.
        assert!(!set.is_newset());
    }

    #[test]
    fn from_counts_drops_zero_entries() {
        let set = counts([("a", 2), ("b", 0), ("c", -1)]);

        assert_eq!(set.count(&"a"), 2);
        assert!(!set.contains(&"b"));
        assert_eq!(set.count(&"c"), -1);

        // Duplicate pairs sum algebraically, cancelling to nothing here.
        let cancelled: SignedMultiset<&str> = [("a", 2), ("a", -2)].into_iter().collect();
        assert!(cancelled.is_empty());
    }

    #[test]
    fn from_difference_of_multisets() {
        let positive = Multiset::from(["a", "a", "b"]);
        let negative = Multiset::from(["b", "c"]);
        let set: SignedMultiset<_> = SignedMultiset::from_difference(&positive, &negative);

        assert_eq!(set.count(&"a"), 2);
        assert!(!set.contains(&"b"));
        assert_eq!(set.count(&"c"), -1);
    }

    #[test]
    fn embedding_a_multiset_keeps_its_counts() {
        let set = SignedMultiset::from(Multiset::from(["a", "a", "b"]));

        assert_eq!(set.count(&"a"), 2);
        assert_eq!(set.count(&"b"), 1);
        assert!(!set.is_proper());
    }

    #[test]
    fn add_and_remove_prune_zero_counts() {
        let mut set = SignedMultiset::new();

        set.add("a", 3);
        set.remove("a", 3);
        assert!(!set.contains(&"a"));

        // Removing an absent element borrows below zero.
        set.remove("b", 2);
        assert_eq!(set.count(&"b"), -2);

        set.add("b", 5);
        assert_eq!(set.count(&"b"), 3);

        // Zero multiplicities change nothing.
        set.add("c", 0);
        set.remove("d", 0);
        assert!(!set.contains(&"c"));
        assert!(!set.contains(&"d"));
    }

    #[test]
    fn parts_decompose_and_recombine() {
        let set = counts([("a", 2), ("b", -3), ("c", 1)]);
        let positive = set.positive_part();
        let negative = set.negative_part();

        assert_eq!(positive.count(&"a"), 2);
        assert_eq!(positive.count(&"c"), 1);
        assert!(!positive.contains(&"b"));

        assert_eq!(negative.count(&"b"), 3);
        assert!(!negative.contains(&"a"));

        assert!(positive.is_disjoint(&negative));

        for element in set.distinct_elements() {
            assert_eq!(
                set.count(element),
                positive.count(element) as isize - negative.count(element) as isize
            );
        }

        assert_eq!(set.weight(), positive.len() + negative.len());
        assert_eq!(
            set.cardinality(),
            positive.len() as isize - negative.len() as isize
        );
    }

    #[test]
    fn parts_are_copies_not_aliases() {
        let set = counts([("a", 2)]);
        let mut positive = set.positive_part();
        positive.remove(&"a");

        assert_eq!(set.count(&"a"), 2);
    }

    #[test]
    fn cardinality_and_weight_of_empty_set_are_zero() {
        let set: SignedMultiset<&str> = SignedMultiset::new();

        assert_eq!(set.cardinality(), 0);
        assert_eq!(set.weight(), 0);
    }

    #[test]
    fn subtract_inverts_counts_outside_own_support() {
        let a = counts([("x", 3), ("y", 1)]);
        let b = counts([("x", 1), ("z", 2)]);
        let difference = a.subtract(&b);

        assert_eq!(difference.count(&"x"), 2);
        assert_eq!(difference.count(&"y"), 1);
        assert_eq!(difference.count(&"z"), -2);

        // Equal counts cancel and are pruned.
        assert!(!a.subtract(&a).contains(&"x"));
        assert!(a.subtract(&a).is_empty());
    }

    #[test]
    fn subtract_accepts_multiset_operands() {
        let a = counts([("x", 1)]);
        let b = Multiset::from(["x", "x", "y"]);
        let difference = a.subtract(&b);

        assert_eq!(difference.count(&"x"), -1);
        assert_eq!(difference.count(&"y"), -1);
    }

    #[test]
    fn combine_and_part_are_subtract_aliases() {
        let a = counts([("x", 3), ("y", -1)]);
        let b = counts([("x", 1), ("z", 4)]);

        assert_eq!(a.combine(&b), a.subtract(&b));
        assert_eq!(a.part(&b), a.subtract(&b));
    }

    #[test]
    fn merge_adds_elementwise() {
        let a = counts([("x", 3), ("y", -1)]);
        let b = counts([("x", -3), ("y", 2)]);
        let merged = a.merge(&b);

        assert!(!merged.contains(&"x"));
        assert_eq!(merged.count(&"y"), 1);
    }

    #[test]
    fn scale_flips_signs_for_negative_factors() {
        let set = counts([("a", 2), ("b", -1)]);

        let doubled = set.scale(2);
        assert_eq!(doubled.count(&"a"), 4);
        assert_eq!(doubled.count(&"b"), -2);

        let negated = set.scale(-1);
        assert_eq!(negated.count(&"a"), -2);
        assert_eq!(negated.count(&"b"), 1);

        assert!(set.scale(0).is_empty());

        // Scaling is pure.
        assert_eq!(set.count(&"a"), 2);
    }

    #[test]
    fn operator_sugar_matches_named_operations() {
        let a = counts([("x", 3), ("y", -1)]);
        let b = counts([("x", 1)]);

        assert_eq!(&a - &b, a.subtract(&b));
        assert_eq!(&a + &b, a.merge(&b));
        assert_eq!(&a * -2, a.scale(-2));
        assert_eq!(-a.clone(), a.scale(-1));
    }

    #[test]
    fn newset_requires_a_single_uniform_unit_sign() {
        assert!(counts([("a", 1), ("b", 1)]).is_newset());
        assert!(counts([("a", -1), ("b", -1)]).is_newset());
        assert!(!counts([("a", 1), ("b", -1)]).is_newset());
        assert!(!counts([("a", 2)]).is_newset());
        assert!(!SignedMultiset::<&str>::new().is_newset());
    }

    #[test]
    fn proper_sets_have_a_negative_count() {
        assert!(counts([("a", 1), ("b", -1)]).is_proper());
        assert!(!counts([("a", 1)]).is_proper());
        assert!(!SignedMultiset::<&str>::new().is_proper());
    }

    #[test]
    fn subset_order_is_asymmetric_around_zero() {
        assert!(counts([("a", 2)]).is_subset(&counts([("a", 3)])));
        assert!(counts([("a", -3)]).is_subset(&counts([("a", -2)])));
        assert!(!counts([("a", 1)]).is_subset(&counts([("a", -2)])));
        assert!(!counts([("a", -2)]).is_subset(&counts([("a", -3)])));

        // An element only present in the operand fails iff its count there
        // is negative: our implicit 0 is never below a negative count.
        assert!(counts([("a", 1)]).is_subset(&counts([("a", 1), ("b", 2)])));
        assert!(!counts([("a", 1)]).is_subset(&counts([("a", 1), ("b", -2)])));

        assert!(SignedMultiset::<&str>::new().is_subset(&counts([("a", 3)])));
    }

    #[test]
    fn superset_swaps_the_subset_roles() {
        let small = counts([("a", 2)]);
        let large = counts([("a", 3)]);

        assert!(large.is_superset(&small));
        assert!(!small.is_superset(&large));
        assert!(!counts([("a", -2)]).is_superset(&counts([("a", 1)])));
    }

    #[test]
    fn disjoint_supports() {
        let a = counts([("x", 1), ("y", -2)]);
        let b = counts([("z", 5)]);

        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&counts([("y", 1)])));
    }

    #[test]
    fn natural_subsets_and_complements() {
        let small = counts([("a", 1)]);
        let large = counts([("a", 2), ("b", 1)]);

        assert!(small.is_natural_subset(&large));
        assert!(!large.is_natural_subset(&small));

        let complement = small.complement(&large).unwrap();
        assert_eq!(complement, counts([("a", 1), ("b", 1)]));

        // Support outside the operand's support rules out naturality.
        assert!(counts([("c", 1)]).complement(&large).is_none());

        // A negative count on our side does too.
        assert!(counts([("a", -1)]).complement(&large).is_none());
    }

    #[test]
    fn display_splits_positive_and_negative_halves() {
        let set = counts([("a", 2), ("b", -1)]);

        assert_eq!(set.to_string(), "{a, a|b}");
        assert_eq!(SignedMultiset::<&str>::new().to_string(), "{|}");
    }

    #[test]
    fn retain_filters_by_element_and_count() {
        let mut set = counts([("a", 2), ("b", -1), ("c", -4)]);
        set.retain(|_, multiplicity| multiplicity < 0);

        assert!(!set.contains(&"a"));
        assert_eq!(set.count(&"b"), -1);
        assert_eq!(set.count(&"c"), -4);
    }

    #[test]
    fn clones_are_independent() {
        let original = counts([("a", 2)]);
        let mut copy = original.clone();
        copy.add("a", -1);

        assert_eq!(original.count(&"a"), 2);
        assert_eq!(copy.count(&"a"), 1);
        assert_ne!(original, copy);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set = counts([("a", 2), ("b", -1)]);
        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.cardinality(), 0);
    }

    #[test]
    fn capacity_management() {
        let mut set: SignedMultiset<i32> = SignedMultiset::with_capacity(10);
        assert!(set.capacity() >= 10);
        assert!(set.try_reserve(100).is_ok());
        set.shrink_to_fit();
        assert!(set.capacity() < 100);
    }
}
