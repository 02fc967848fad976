use crate::Multiplicities;
use hashbrown::{hash_map, HashMap, TryReserveError};
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt::{self, Debug, Display};
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

/// Multiset implementation where elements are stored with positive multiplicities.
///
/// Every stored multiplicity is at least 1: operations that would leave an
/// entry at 0 remove the entry instead, so the support only ever contains
/// elements that actually occur.
///
/// # Examples
///
/// ```
/// use hybrid_multiset::Multiset;
///
/// let mut set = Multiset::new();
/// set.insert(1);
/// set.insert(1);
/// set.insert(2);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.count(&1), 2);
/// ```
#[derive(Clone)]
pub struct Multiset<E, S = RandomState> {
    pub(crate) counts: HashMap<E, usize, S>,
}

impl<E> Multiset<E, RandomState> {
    /// Creates an empty `Multiset` with a capacity of 0,
    /// so it will not allocate until it is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::Multiset;
    ///
    /// let set: Multiset<i32> = Multiset::new();
    ///
    /// assert_eq!(set.capacity(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: HashMap::with_hasher(RandomState::default()),
        }
    }

    /// Creates an empty `Multiset` with space for at least the specified
    /// number of distinct elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
        }
    }
}

impl<E, S> Multiset<E, S> {
    /// Creates an empty `Multiset` with default capacity which will use the given hash builder to hash elements.
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self {
            counts: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty `Multiset` with at least the specified capacity, using the given hash builder to hash elements.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns the number of distinct elements the multiset can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.counts.capacity()
    }

    /// Returns a reference to the multiset's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.counts.hasher()
    }

    /// Returns the total number of occurrences, i.e. the sum of all
    /// multiplicities. An empty multiset has length 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::Multiset;
    ///
    /// let set = Multiset::from(["a", "a", "b"]);
    ///
    /// assert_eq!(set.len(), 3);
    /// assert_eq!(Multiset::<&str>::new().len(), 0);
    /// ```
    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns the number of distinct elements in the multiset.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the multiset contains no elements.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Clears the multiset, removing all elements. Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Multiplies every multiplicity by `factor`. A factor of 0 is a no-op,
    /// since a multiset cannot hold zero multiplicities.
    pub fn scale(&mut self, factor: usize) {
        if factor == 0 {
            return;
        }

        for multiplicity in self.counts.values_mut() {
            *multiplicity *= factor;
        }
    }

    /// Retains only the elements specified by the predicate, which is given
    /// each distinct element together with its multiplicity.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&E, usize) -> bool,
    {
        self.counts.retain(|element, multiplicity| f(element, *multiplicity));
    }

    /// Returns `true` if `predicate` holds for every distinct element.
    /// Vacuously `true` on an empty multiset.
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        self.counts.keys().all(predicate)
    }

    /// Returns `true` if `predicate` holds for at least one distinct element.
    /// Always `false` on an empty multiset.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        self.counts.keys().any(predicate)
    }

    /// An iterator visiting every occurrence in arbitrary order, so an
    /// element with multiplicity 3 is yielded 3 times. Repeated occurrences
    /// of the same element are consecutive. The iterator element type is `&'a E`.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            counts: self.counts.iter(),
            current: None,
            remaining: self.len(),
        }
    }

    /// An iterator visiting each distinct element with its multiplicity, in
    /// arbitrary order. The iterator element type is `(&'a E, usize)`.
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

impl<E, S> Multiset<E, S>
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

    /// Shrinks the capacity of the multiset as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.counts.shrink_to_fit();
    }

    /// Shrinks the capacity of the multiset with a lower limit.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.counts.shrink_to(min_capacity);
    }

    /// Adds one occurrence of `element` to the multiset.
    pub fn insert(&mut self, element: E) {
        self.insert_many(element, 1);
    }

    /// Adds `count` occurrences of `element` to the multiset.
    /// Inserting 0 occurrences is a no-op.
    pub fn insert_many(&mut self, element: E, count: usize) {
        if count == 0 {
            return;
        }

        *self.counts.entry(element).or_insert(0) += count;
    }

    /// Removes one occurrence of `element` from the multiset.
    /// Returns whether an occurrence was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::Multiset;
    ///
    /// let mut set = Multiset::new();
    /// set.insert(1);
    /// set.insert(1);
    ///
    /// assert!(set.remove(&1));
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_many(element, 1) > 0
    }

    /// Removes up to `count` occurrences of `element`, returning the number
    /// of occurrences actually removed. If the multiplicity drops to 0 the
    /// entry is deleted; removing an absent element is a no-op, since a
    /// multiset has no negative counts to borrow from.
    pub fn remove_many<Q>(&mut self, element: &Q, count: usize) -> usize
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if count == 0 {
            return 0;
        }

        let remaining = match self.counts.get_mut(element) {
            None => return 0,
            Some(multiplicity) => {
                if *multiplicity > count {
                    *multiplicity -= count;
                    return count;
                }

                *multiplicity
            }
        };

        self.counts.remove(element);
        remaining
    }

    /// Returns `true` if `element` has multiplicity at least 1.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.contains_key(element)
    }

    /// Returns the multiplicity of `element`, or 0 if it is absent.
    pub fn count<Q>(&self, element: &Q) -> usize
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.get(element).copied().unwrap_or(0)
    }

    /// Returns `true` if every multiplicity in `self` is at most the
    /// corresponding multiplicity in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.counts
            .iter()
            .all(|(element, &multiplicity)| multiplicity <= other.count(element))
    }

    /// Returns `true` if every multiplicity in `other` is at most the
    /// corresponding multiplicity in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the supports of `self` and `other` share no element.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.counts.keys().all(|element| !other.contains(element))
    }
}

impl<E, S> Multiset<E, S>
where
    E: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    /// Adds every occurrence of `other` to `self`, i.e. multiplicities add
    /// elementwise over the union of the supports.
    pub fn combine(&mut self, other: &Self) {
        for (element, &multiplicity) in &other.counts {
            self.insert_many(element.clone(), multiplicity);
        }
    }

    /// Returns the multiset union: each element's multiplicity is the
    /// maximum of its multiplicities in `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_multiset::Multiset;
    ///
    /// let a = Multiset::from(["a", "b"]);
    /// let b = Multiset::from(["a", "a", "c"]);
    /// let union = a.union(&b);
    ///
    /// assert_eq!(union.count(&"a"), 2);
    /// assert_eq!(union.count(&"b"), 1);
    /// assert_eq!(union.count(&"c"), 1);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();

        for (element, &multiplicity) in &other.counts {
            let current = result.counts.entry(element.clone()).or_insert(0);

            if multiplicity > *current {
                *current = multiplicity;
            }
        }

        result
    }

    /// Returns the multiset intersection: each element's multiplicity is the
    /// minimum of its multiplicities in `self` and `other`. Elements absent
    /// from either side are excluded.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = Self::with_hasher(self.hasher().clone());

        for (element, &multiplicity) in &self.counts {
            let shared = multiplicity.min(other.count(element));

            if shared > 0 {
                result.counts.insert(element.clone(), shared);
            }
        }

        result
    }

    /// Returns the multiset difference: each element's multiplicity is its
    /// multiplicity in `self` minus its multiplicity in `other`, clamped to 0.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = Self::with_hasher(self.hasher().clone());

        for (element, &multiplicity) in &self.counts {
            let left = multiplicity.saturating_sub(other.count(element));

            if left > 0 {
                result.counts.insert(element.clone(), left);
            }
        }

        result
    }

    /// Returns the symmetric difference: each element's multiplicity is the
    /// absolute difference of its multiplicities in `self` and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = Self::with_hasher(self.hasher().clone());

        for (element, &multiplicity) in &self.counts {
            let diff = multiplicity.abs_diff(other.count(element));

            if diff > 0 {
                result.counts.insert(element.clone(), diff);
            }
        }

        for (element, &multiplicity) in &other.counts {
            if !self.contains(element) {
                result.counts.insert(element.clone(), multiplicity);
            }
        }

        result
    }
}

impl<E, S> Multiplicities<E> for Multiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn multiplicity(&self, element: &E) -> isize {
        self.count(element) as isize
    }

    fn visit_counts(&self, mut visit: impl FnMut(&E, isize) -> bool) -> bool {
        for (element, &multiplicity) in &self.counts {
            if !visit(element, multiplicity as isize) {
                return false;
            }
        }

        true
    }
}

impl<E, S> FromIterator<E> for Multiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Builds a multiset where each element's multiplicity is its number of
    /// occurrences in the iterator.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::with_hasher(Default::default());
        set.extend(iter);
        set
    }
}

impl<E, S> FromIterator<(E, usize)> for Multiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Builds a multiset from (element, multiplicity) pairs. Multiplicities
    /// of the same element add up; pairs with multiplicity 0 are dropped.
    fn from_iter<I: IntoIterator<Item = (E, usize)>>(iter: I) -> Self {
        let mut set = Self::with_hasher(Default::default());

        for (element, multiplicity) in iter {
            set.insert_many(element, multiplicity);
        }

        set
    }
}

impl<E, S> Extend<E> for Multiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, E, S> Extend<&'a E> for Multiset<E, S>
where
    E: 'a + Eq + Hash + Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a E>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<E, const N: usize> From<[E; N]> for Multiset<E, RandomState>
where
    E: Eq + Hash,
{
    fn from(arr: [E; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, E, S> IntoIterator for &'a Multiset<E, S> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

impl<E, S> IntoIterator for Multiset<E, S>
where
    E: Clone,
{
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        IntoIter {
            counts: self.counts.into_iter(),
            current: None,
        }
    }
}

impl<E, S> Default for Multiset<E, S>
where
    S: Default,
{
    fn default() -> Self {
        Multiset {
            counts: HashMap::default(),
        }
    }
}

impl<E, S> PartialEq for Multiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<E, S> Eq for Multiset<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
}

impl<E, S> Debug for Multiset<E, S>
where
    E: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<E, S> Display for Multiset<E, S>
where
    E: Display,
{
    /// Renders each element repeated per its multiplicity, e.g. `{a, a, b}`,
    /// or `{}` when empty. Element order is arbitrary; this is a display
    /// format, not a serialization format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        let mut first = true;

        for element in self.iter() {
            if !first {
                f.write_str(", ")?;
            }

            write!(f, "{element}")?;
            first = false;
        }

        f.write_str("}")
    }
}

/// An iterator over the occurrences of a `Multiset`.
pub struct Iter<'a, E> {
    counts: hash_map::Iter<'a, E, usize>,
    current: Option<(&'a E, usize)>,
    remaining: usize,
}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            counts: self.counts.clone(),
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        loop {
            match self.current {
                Some((element, ref mut left)) if *left > 0 => {
                    *left -= 1;
                    self.remaining -= 1;
                    return Some(element);
                }
                _ => {
                    let (element, &multiplicity) = self.counts.next()?;
                    self.current = Some((element, multiplicity));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<E> FusedIterator for Iter<'_, E> {}

impl<E: Debug> Debug for Iter<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the occurrences of a `Multiset`.
pub struct IntoIter<E> {
    counts: hash_map::IntoIter<E, usize>,
    current: Option<(E, usize)>,
}

impl<E> Iterator for IntoIter<E>
where
    E: Clone,
{
    type Item = E;

    fn next(&mut self) -> Option<E> {
        loop {
            match self.current.take() {
                Some((element, left)) if left > 1 => {
                    let occurrence = element.clone();
                    self.current = Some((element, left - 1));
                    return Some(occurrence);
                }
                Some((element, _)) => return Some(element),
                None => self.current = Some(self.counts.next()?),
            }
        }
    }
}

impl<E: Clone> FusedIterator for IntoIter<E> {}

/// An iterator over the distinct elements of a `Multiset` paired with their
/// multiplicities.
pub struct Counts<'a, E> {
    iter: hash_map::Iter<'a, E, usize>,
}

impl<E> Clone for Counts<'_, E> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, E> Iterator for Counts<'a, E> {
    type Item = (&'a E, usize);

    fn next(&mut self) -> Option<(&'a E, usize)> {
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

/// An iterator over the distinct elements of a `Multiset`.
pub struct Distinct<'a, E> {
    iter: hash_map::Keys<'a, E, usize>,
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
