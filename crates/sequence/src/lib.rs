#[cfg(feature = "serde")]
mod serde_impl;
mod sort;

use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Index;

pub use sort::INSERTION_THRESHOLD;

/// Builds a [`Sequence`] with `vec!` syntax.
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::Sequence::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Sequence::from(::std::vec![$elem; $n])
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Sequence::from(::std::vec![$($x),+])
    };
}

/// Ordered, resizable sequence of values.
///
/// - Indices start at 0 and duplicates are allowed.
/// - Every transforming operation returns a new sequence and leaves `self`
///   untouched. The only mutating operations take `&mut self`.
/// - Callbacks receive elements by reference, are invoked at most once per
///   element, and are invoked in index order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Returns true iff `eq(element, target)` holds for some element.
    ///
    /// Scans in index order and stops at the first match.
    pub fn contains<F>(&self, target: &T, mut eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.items.iter().any(|item| eq(item, target))
    }

    /// Applies `f` to every element, keeping the element type.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(&T) -> T,
    {
        self.items.iter().map(f).collect()
    }

    /// Like [`Sequence::map`], but stops at the first error returned by `f`.
    pub fn try_map<F, E>(&self, f: F) -> Result<Self, E>
    where
        F: FnMut(&T) -> Result<T, E>,
    {
        self.items.iter().map(f).collect()
    }

    /// Reorders the elements in place so that no adjacent pair `(x, y)`
    /// satisfies `less(y, x)`. The sort is stable.
    pub fn sort_in_place<F>(&mut self, mut less: F) -> &mut Self
    where
        T: Clone,
        F: FnMut(&T, &T) -> bool,
    {
        let already_ordered = sort::stable_sort(&mut self.items, &mut less);
        log::trace!(
            "sorted {} elements (already ordered: {already_ordered})",
            self.items.len()
        );
        self
    }
}

impl<T: Clone> Sequence<T> {
    /// Stable sort into a new sequence. See [`Sequence::sort_in_place`].
    pub fn sort<F>(&self, less: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut sorted = self.clone();
        sorted.sort_in_place(less);
        sorted
    }

    /// Keeps the elements for which `pred` holds, in their original order.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| pred(*item)).cloned().collect()
    }

    /// Like [`Sequence::filter`], but stops at the first error returned by
    /// `pred`.
    pub fn try_filter<F, E>(&self, mut pred: F) -> Result<Self, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut kept = Vec::new();
        for item in &self.items {
            if pred(item)? {
                kept.push(item.clone());
            }
        }
        Ok(Self::from(kept))
    }

    /// Splits the sequence into consecutive runs of `size` elements.
    ///
    /// - The last run holds the remainder when `len` is not a multiple of
    ///   `size`.
    /// - `size == 0` yields exactly one chunk holding the whole sequence, even
    ///   when the sequence is empty.
    /// - An empty sequence with `size > 0` yields no chunks at all.
    pub fn chunk(&self, size: usize) -> Sequence<Self> {
        if size == 0 {
            log::trace!("chunk size 0: single chunk of {} elements", self.len());
            return Sequence::from(vec![self.clone()]);
        }

        let mut chunks = Sequence::with_capacity(self.len().div_ceil(size));
        for run in self.items.chunks(size) {
            chunks.push(Self::from(run));
        }
        log::trace!(
            "chunked {} elements into {} chunks of size {size}",
            self.len(),
            chunks.len()
        );
        chunks
    }

    /// Returns `self[..at] ++ items ++ self[at..]`.
    ///
    /// `at` past the end appends. With no items the result equals `self`.
    pub fn insert<I>(&self, at: usize, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return self.clone();
        }

        let split = at.min(self.len());
        if split != at {
            log::trace!("insert index {at} clamped to {split}");
        }

        let mut spliced = Vec::with_capacity(self.len() + items.len());
        spliced.extend_from_slice(&self.items[..split]);
        spliced.extend(items);
        spliced.extend_from_slice(&self.items[split..]);
        Self::from(spliced)
    }

    /// Keeps the first occurrence of every distinct value, in order.
    ///
    /// Runs in O(n) on average. See [`Sequence::unique_by`] for element types
    /// that cannot be hashed.
    pub fn unique(&self) -> Self
    where
        T: Eq + Hash,
    {
        let mut seen = HashSet::with_capacity(self.len());
        let unique: Self = self
            .items
            .iter()
            .filter(|item| seen.insert(*item))
            .cloned()
            .collect();
        log::trace!("unique kept {} of {} elements", unique.len(), self.len());
        unique
    }

    /// Keeps each element unless `eq(kept, element)` holds for an element
    /// already kept. O(n^2) comparisons in the worst case.
    pub fn unique_by<F>(&self, mut eq: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut unique: Vec<T> = Vec::new();
        for item in &self.items {
            if !unique.iter().any(|kept| eq(kept, item)) {
                unique.push(item.clone());
            }
        }
        log::trace!("unique_by kept {} of {} elements", unique.len(), self.len());
        Self::from(unique)
    }
}

impl<T> Sequence<Sequence<T>> {
    /// Joins the chunks back together in order.
    pub fn concat(self) -> Sequence<T> {
        self.into_iter().flatten().collect()
    }
}

/// Maps every element into a new element type, preserving order and length.
pub fn convert<T, U, F>(from: &Sequence<T>, f: F) -> Sequence<U>
where
    F: FnMut(&T) -> U,
{
    from.iter().map(f).collect()
}

/// Like [`convert`], but stops at the first error returned by `f`.
pub fn try_convert<T, U, E, F>(from: &Sequence<T>, f: F) -> Result<Sequence<U>, E>
where
    F: FnMut(&T) -> Result<U, E>,
{
    from.iter().map(f).collect()
}

/// Left fold starting from `U::default()`.
///
/// `f` is never called for an empty sequence, so the result is then the
/// default value itself.
pub fn reduce_into<T, U, F>(from: &Sequence<T>, mut f: F) -> U
where
    U: Default,
    F: FnMut(U, &T) -> U,
{
    from.iter().fold(U::default(), |acc, item| f(acc, item))
}

/// Like [`reduce_into`], but stops at the first error returned by `f`.
pub fn try_reduce_into<T, U, E, F>(from: &Sequence<T>, mut f: F) -> Result<U, E>
where
    U: Default,
    F: FnMut(U, &T) -> Result<U, E>,
{
    from.iter().try_fold(U::default(), |acc, item| f(acc, item))
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Self {
        Self {
            items: Vec::from(items),
        }
    }
}

impl<T: Clone> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T> From<Sequence<T>> for Vec<T> {
    fn from(sequence: Sequence<T>) -> Self {
        sequence.items
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}
