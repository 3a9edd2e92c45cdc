use core::marker::PhantomData;

use super::{DEFAULT_LEVELS, DEFAULT_SEED, SkipSet};
use crate::compare::{Compare, Natural};
use crate::raw::RawSkipSet;

/// Configures a [`SkipSet`] before it is created.
///
/// # Examples
///
/// ```
/// use skipset::SkipSet;
///
/// let set: SkipSet<u64> = SkipSet::builder().seed(42).levels(4).capacity(1_000).build();
/// assert_eq!(set.levels(), 4);
/// assert!(set.capacity() >= 1_000);
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct Builder<T> {
    seed: u64,
    levels: usize,
    capacity: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Builder<T> {
    fn new() -> Self {
        Builder {
            seed: DEFAULT_SEED,
            levels: DEFAULT_LEVELS,
            capacity: 0,
            marker: PhantomData,
        }
    }

    /// Seeds the generator that picks tower heights.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the initial number of levels. Values below 1 are raised to 1.
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = levels.max(1);
        self
    }

    /// Reserves room for at least `capacity` elements.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds a set ordered by `cmp`.
    pub fn build_with<C: Compare<T>>(self, cmp: C) -> SkipSet<T, C> {
        SkipSet::from_raw(RawSkipSet::new(cmp, self.seed, self.levels, self.capacity))
    }
}

impl<T: Ord> Builder<T> {
    /// Builds a set ordered by `T`'s [`Ord`] implementation.
    #[must_use]
    pub fn build(self) -> SkipSet<T> {
        self.build_with(Natural)
    }
}

impl<T> SkipSet<T> {
    /// Returns a [`Builder`] for configuring the seed, initial levels and capacity.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    pub fn builder() -> Builder<T> {
        Builder::new()
    }
}

impl<T: Ord> SkipSet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<i32> = SkipSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::builder().capacity(capacity).build()
    }
}

impl<T, C> SkipSet<T, C> {
    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<i32> = SkipSet::with_capacity(32);
    /// assert!(set.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw().capacity()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let set: SkipSet<i32> = SkipSet::builder().build();
        assert_eq!(set.levels(), DEFAULT_LEVELS);
        assert!(set.is_empty());
    }

    #[test]
    fn zero_levels_is_raised_to_one() {
        let set: SkipSet<i32> = SkipSet::builder().levels(0).build();
        assert_eq!(set.levels(), 1);
    }

    #[test]
    fn equal_seeds_build_equal_shapes() {
        let mut a = SkipSet::builder().seed(9).levels(3).build();
        let mut b = SkipSet::builder().seed(9).levels(3).build();
        a.extend(0..500);
        b.extend(0..500);
        assert_eq!(a.levels(), b.levels());
        for x in 0..500 {
            assert_eq!(a.raw().locate(&x).len(), b.raw().locate(&x).len());
            let ranks_a: alloc::vec::Vec<_> = a.raw().locate(&x).iter().map(|step| step.rank).collect();
            let ranks_b: alloc::vec::Vec<_> = b.raw().locate(&x).iter().map(|step| step.rank).collect();
            assert_eq!(ranks_a, ranks_b);
        }
    }
}
