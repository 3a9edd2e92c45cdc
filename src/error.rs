/// Errors raised by [`Cursor`](crate::Cursor) removal.
///
/// Lookups never fail: absence is reported as `None`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The set was structurally modified by something other than this cursor since the cursor
    /// last synchronized with it.
    #[error("set modified during iteration (cursor saw stamp {expected}, set is at {found})")]
    ConcurrentModification {
        /// The stamp the cursor captured.
        expected: u64,
        /// The set's stamp at the time of the call.
        found: u64,
    },
    /// The cursor is not positioned on an element: `next` was never called, returned `None`,
    /// or the current element was already removed.
    #[error("cursor has no current element")]
    NoCurrentElement,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let err = Error::ConcurrentModification { expected: 3, found: 5 };
        assert_eq!(err.to_string(), "set modified during iteration (cursor saw stamp 3, set is at 5)");
        assert_eq!(Error::NoCurrentElement.to_string(), "cursor has no current element");
    }
}
