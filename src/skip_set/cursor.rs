use super::SkipSet;
use crate::compare::Compare;
use crate::error::Error;
use crate::raw::Handle;

/// A detached, fail-fast cursor over a [`SkipSet`].
///
/// Unlike [`Iter`](super::Iter), a cursor does not borrow the set between calls, so the set
/// may be modified while the cursor is alive. The cursor records the set's modification stamp
/// when created; [`remove_current`] refuses to run if any structural change (an insertion of a
/// new element, a removal, [`clear`] or [`rebuild`]) happened since, unless that change was the
/// cursor's own removal. Overwriting an existing equal element is not a structural change.
///
/// This detects modification by the single owner of the set; it is not a synchronization
/// primitive. After an undetected change, [`has_next`] and [`next`] stay memory safe but may
/// skip or repeat elements. A cursor must only be used with the set that created it.
///
/// [`remove_current`]: Cursor::remove_current
/// [`has_next`]: Cursor::has_next
/// [`next`]: Cursor::next
/// [`clear`]: SkipSet::clear
/// [`rebuild`]: SkipSet::rebuild
///
/// # Examples
///
/// ```
/// use skipset::{Error, SkipSet};
///
/// let mut set = SkipSet::from([1, 2, 3, 4]);
/// let mut cursor = set.cursor();
/// while let Some(&x) = cursor.next(&set) {
///     if x % 2 == 0 {
///         cursor.remove_current(&mut set)?;
///     }
/// }
/// assert!(set.iter().eq([1, 3].iter()));
///
/// let mut cursor = set.cursor();
/// cursor.next(&set);
/// set.insert(10);
/// assert!(matches!(cursor.remove_current(&mut set), Err(Error::ConcurrentModification { .. })));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    // Node whose level-0 successor is yielded next.
    position: Handle,
    // Node last yielded and not yet removed.
    current: Option<Handle>,
    stamp: u64,
}

impl Cursor {
    pub(crate) fn new(stamp: u64) -> Self {
        Cursor {
            position: Handle::HEAD,
            current: None,
            stamp,
        }
    }

    /// Returns `true` if another call to [`next`](Cursor::next) would yield an element.
    #[must_use]
    pub fn has_next<T, C>(&self, set: &SkipSet<T, C>) -> bool {
        set.raw().try_next(self.position).is_some_and(|next| !next.is_sentinel())
    }

    /// Advances the cursor and returns the element it now rests on, or `None` at the end.
    pub fn next<'a, T, C>(&mut self, set: &'a SkipSet<T, C>) -> Option<&'a T> {
        let raw = set.raw();
        let next = raw.try_next(self.position)?;
        let element = raw.element(next)?;
        self.position = next;
        self.current = Some(next);
        Some(element)
    }

    /// Removes the element last returned by [`next`](Cursor::next) and returns it.
    ///
    /// The following call to `next` yields the element after the removed one.
    ///
    /// # Errors
    ///
    /// - [`Error::ConcurrentModification`] if the set was structurally changed since the cursor
    ///   was created or last removed an element.
    /// - [`Error::NoCurrentElement`] if `next` has not returned an element since the cursor was
    ///   created or last removed one.
    pub fn remove_current<T, C: Compare<T>>(&mut self, set: &mut SkipSet<T, C>) -> Result<T, Error> {
        let found = set.raw().stamp();
        if found != self.stamp {
            return Err(Error::ConcurrentModification {
                expected: self.stamp,
                found,
            });
        }

        let current = self.current.take().ok_or(Error::NoCurrentElement)?;
        let (element, predecessor) = set.raw_mut().remove_handle(current);
        self.position = predecessor;
        self.stamp = set.raw().stamp();
        Ok(element)
    }
}
