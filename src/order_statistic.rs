/// A zero-based position in the sorted order of a set.
///
/// # Examples
///
/// ```
/// use skipset::{Rank, SkipSet};
///
/// let set = SkipSet::from(["b", "a"]);
/// assert_eq!(set[Rank(0)], "a");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
