use core::ops::Index;

use super::SkipSet;
use crate::Rank;
use crate::compare::Compare;

impl<T, C> SkipSet<T, C> {
    /// Returns the value at 0-based position `index` in sorted order.
    ///
    /// Returns `None` if `index >= len()`.
    ///
    /// # Complexity
    ///
    /// Expected O(log n): every link records how many elements it skips.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([10, 20, 30]);
    /// assert_eq!(set.find_index(1), Some(&20));
    /// assert!(set.find_index(3).is_none());
    /// ```
    #[doc(alias = "get_by_rank")]
    #[must_use]
    pub fn find_index(&self, index: usize) -> Option<&T> {
        self.raw().find_index(index)
    }
}

impl<T, C: Compare<T>> SkipSet<T, C> {
    /// Returns the 0-based position of `value` in sorted order, or `None` if the value is not
    /// present.
    ///
    /// # Complexity
    ///
    /// Expected O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set = SkipSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.raw().rank_of(value)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use skipset::{Rank, SkipSet};
///
/// let set = SkipSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T, C> Index<Rank> for SkipSet<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.find_index(rank.0).expect("index out of bounds")
    }
}
