use core::cmp::Ordering;

/// A total order over `T`, supplied to a [`SkipSet`](crate::SkipSet) at construction.
///
/// Implementations must be consistent: the same pair always compares the same way, the order
/// is antisymmetric and transitive. A comparator that violates this can make the set return
/// wrong answers or lose elements, but never causes undefined behavior.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator.
///
/// # Examples
///
/// ```
/// use skipset::SkipSet;
///
/// let mut set = SkipSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// set.extend([1, 3, 2]);
/// assert_eq!(set.first(), Some(&3));
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The order given by `T`'s [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_uses_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn closures_are_comparators() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"abc", &"xyz"), Ordering::Equal);
        assert_eq!(by_len.compare(&"a", &"xyz"), Ordering::Less);
    }
}
