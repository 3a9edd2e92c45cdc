use core::fmt;
use core::iter::FusedIterator;

use alloc::vec;

use crate::compare::{Compare, Natural};
use crate::raw::{Handle, RawSkipSet};

mod builder;
mod cursor;
mod order_statistic;

pub use builder::Builder;
pub use cursor::Cursor;

/// Number of levels a new set starts with.
pub const DEFAULT_LEVELS: usize = 16;

/// Seed of the level generator when none is supplied.
pub const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// An ordered set based on a skip list.
///
/// Elements are kept sorted by a [`Compare`] implementation, by default the element type's
/// [`Ord`]. Insertion, removal, membership and the neighbor queries [`floor`] and [`ceiling`]
/// take expected O(log n) time. Every link records how many elements it skips, so positional
/// lookups by [`find_index`] and [`rank_of`] are expected O(log n) as well.
///
/// Tower heights are drawn from a seeded generator owned by the set, so a set built from the
/// same seed and the same sequence of operations always has the same shape. When the set
/// outgrows its levels (`floor(log2(len)) > levels()`), new empty levels are added on top; they
/// fill up as later insertions happen to reach them. [`rebuild`] redistributes existing elements
/// into a perfectly balanced layout on demand.
///
/// It is a logic error for an element to be modified in such a way that its ordering relative
/// to any other element changes while it is in the set. The behavior resulting from such a
/// logic error is not specified, but will be encapsulated to the `SkipSet` that observed the
/// logic error and not result in undefined behavior.
///
/// [`floor`]: SkipSet::floor
/// [`ceiling`]: SkipSet::ceiling
/// [`find_index`]: SkipSet::find_index
/// [`rank_of`]: SkipSet::rank_of
/// [`rebuild`]: SkipSet::rebuild
///
/// # Examples
///
/// ```
/// use skipset::SkipSet;
///
/// let mut set = SkipSet::new();
/// for x in [1, 5, 3, 9, 2] {
///     set.insert(x);
/// }
///
/// assert_eq!(set.first(), Some(&1));
/// assert_eq!(set.last(), Some(&9));
/// assert_eq!(set.floor(&4), Some(&3));
/// assert_eq!(set.ceiling(&4), Some(&5));
/// assert_eq!(set.find_index(2), Some(&3));
/// assert!(!set.contains(&7));
///
/// set.remove(&5);
/// assert_eq!(set.ceiling(&4), Some(&9));
/// ```
pub struct SkipSet<T, C = Natural> {
    raw: RawSkipSet<T, C>,
}

/// An iterator over the elements of a `SkipSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`SkipSet`].
///
/// # Examples
///
/// ```
/// use skipset::SkipSet;
///
/// let set = SkipSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: SkipSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a, C: 'a = Natural> {
    raw: &'a RawSkipSet<T, C>,
    // Last node yielded from the front.
    front: Handle,
    // Positions `index..back` have not been yielded yet.
    index: usize,
    back: usize,
}

/// An owning iterator over the elements of a `SkipSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`SkipSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: SkipSet#method.into_iter
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T: Ord> SkipSet<T> {
    /// Makes a new, empty `SkipSet` ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<i32> = SkipSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Makes a new, empty `SkipSet` whose level generator is seeded with `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::with_seed(7);
    /// set.insert("a");
    /// assert_eq!(set.len(), 1);
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::builder().seed(seed).build()
    }
}

impl<T, C: Compare<T>> SkipSet<T, C> {
    /// Makes a new, empty `SkipSet` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// set.insert("ccc");
    /// set.insert("a");
    /// assert_eq!(set.first(), Some(&"a"));
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        SkipSet::builder().build_with(cmp)
    }

    pub(crate) fn from_raw(raw: RawSkipSet<T, C>) -> Self {
        Self { raw }
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the set did not previously contain an equal value. Otherwise the stored
    /// value is overwritten with `value`, the length is unchanged, and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    #[doc(alias = "add")]
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.replace(value).is_none()
    }

    /// Adds a value to the set, replacing the existing equal value, if any, and returning it.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
    /// assert_eq!(set.replace((1, 'a')), None);
    /// assert_eq!(set.replace((1, 'b')), Some((1, 'a')));
    /// assert_eq!(set.first(), Some(&(1, 'b')));
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.raw.replace(value)
    }

    /// Removes the value equal to `value` from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::from([1, 2]);
    /// assert_eq!(set.remove(&2), Some(2));
    /// assert_eq!(set.remove(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.raw.remove(value)
    }

    /// Returns `true` if the set contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.contains(value)
    }

    /// Returns a reference to the stored value equal to `value`, if any.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.get(value)
    }

    /// Returns the least value greater than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([10, 20, 30]);
    /// assert_eq!(set.ceiling(&20), Some(&20));
    /// assert_eq!(set.ceiling(&21), Some(&30));
    /// assert_eq!(set.ceiling(&31), None);
    /// ```
    #[must_use]
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.raw.ceiling(value)
    }

    /// Returns the greatest value less than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([10, 20, 30]);
    /// assert_eq!(set.floor(&20), Some(&20));
    /// assert_eq!(set.floor(&19), Some(&10));
    /// assert_eq!(set.floor(&9), None);
    /// ```
    #[must_use]
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.raw.floor(value)
    }

    /// Removes the first value from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::from([2, 1]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.raw.handle_at(0)?;
        Some(self.raw.remove_handle(handle).0)
    }

    /// Removes the last value from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::from([2, 1]);
    /// assert_eq!(set.pop_last(), Some(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.raw.handle_at(self.len().checked_sub(1)?)?;
        Some(self.raw.remove_handle(handle).0)
    }

    /// Retains only the values for which `keep` returns `true`, visiting them in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<i32> = (0..8).collect();
    /// set.retain(|x| x % 2 == 0);
    /// assert!(set.iter().eq([0, 2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some(value) = cursor.next(self) {
            if !keep(value) {
                let removed = cursor.remove_current(self);
                debug_assert!(removed.is_ok(), "cursor lost track of its own set");
            }
        }
    }
}

impl<T, C> SkipSet<T, C> {
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    #[doc(alias = "size")]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of levels the set currently links through.
    ///
    /// Starts at the configured level count and grows as the set does; it never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::builder().levels(2).build();
    /// set.extend(0..16);
    /// assert_eq!(set.levels(), 4);
    /// ```
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.raw.capacity_level()
    }

    /// Returns the comparator ordering this set.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the first (least) value in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([3, 1]);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns the last (greatest) value in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([3, 1]);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.find_index(self.len().checked_sub(1)?)
    }

    /// Clears the set, removing all values. The level count is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Redistributes all elements into a perfectly balanced layout.
    ///
    /// The element at 1-based position `p` gets `trailing_zeros(p) + 1` levels, capped at
    /// [`levels`](SkipSet::levels). This restores the O(log n) search depth after bulk
    /// insertions into a set that has outgrown its levels. Counts as a structural change.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn rebuild(&mut self) {
        self.raw.rebuild();
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([3, 1, 2]);
    /// let values: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            raw: &self.raw,
            front: Handle::HEAD,
            index: 0,
            back: self.len(),
        }
    }

    /// Creates a detached [`Cursor`] positioned before the first element.
    ///
    /// The cursor does not borrow the set; it detects structural changes made behind its back.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.raw.stamp())
    }

    pub(crate) fn raw(&self) -> &RawSkipSet<T, C> {
        &self.raw
    }

    pub(crate) fn raw_mut(&mut self) -> &mut RawSkipSet<T, C> {
        &mut self.raw
    }
}

impl<T: Clone, C: Clone> Clone for SkipSet<T, C> {
    fn clone(&self) -> Self {
        SkipSet { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SkipSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Default for SkipSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq, C> PartialEq for SkipSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for SkipSet<T, C> {}

impl<T: Ord> FromIterator<T> for SkipSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SkipSet::new();
        set.extend(iter);
        set
    }
}

impl<T, C: Compare<T>> Extend<T> for SkipSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for SkipSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SkipSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C> IntoIterator for SkipSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `SkipSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a SkipSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.index >= self.back {
            return None;
        }
        self.front = self.raw.next(self.front);
        self.index += 1;
        self.raw.element(self.front)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    /// Each step from the back is a positional lookup, expected O(log n).
    fn next_back(&mut self) -> Option<&'a T> {
        if self.index >= self.back {
            return None;
        }
        self.back -= 1;
        self.raw.find_index(self.back)
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {
    fn len(&self) -> usize {
        self.back - self.index
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            index: self.index,
            back: self.back,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}
