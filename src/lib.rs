//! A probabilistic ordered set for Rust.
//!
//! This crate provides [`SkipSet`], an ordered set backed by a skip list: a stack of sorted
//! linked lists in which every level holds a random subset of the level below it.
//!
//! - [`insert`](SkipSet::insert), [`remove`](SkipSet::remove), [`contains`](SkipSet::contains)
//! - Ordered-neighbor queries: [`floor`](SkipSet::floor) and [`ceiling`](SkipSet::ceiling)
//! - Positional queries: [`find_index`](SkipSet::find_index), [`rank_of`](SkipSet::rank_of)
//!   and indexing by [`Rank`]
//! - A detached, fail-fast [`Cursor`] that can remove elements in place
//!
//! # Example
//!
//! ```
//! use skipset::{Rank, SkipSet};
//!
//! let mut set = SkipSet::with_seed(1);
//! for x in [1, 5, 3, 9, 2] {
//!     set.insert(x);
//! }
//!
//! assert_eq!(set.floor(&4), Some(&3));
//! assert_eq!(set.ceiling(&4), Some(&5));
//! assert_eq!(set[Rank(2)], 3);
//!
//! // Remove every odd element while walking the set.
//! let mut cursor = set.cursor();
//! while let Some(&x) = cursor.next(&set) {
//!     if x % 2 == 1 {
//!         cursor.remove_current(&mut set).unwrap();
//!     }
//! }
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [2]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Deterministic** - Tower heights come from a seeded generator owned by the set
//! - **Custom orders** - Any [`Compare`] implementation, including closures
//! - **`tracing`** (optional) - Debug events on level growth and rebuilds
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index, so removal never leaves dangling
//! references. Each link records its span (the number of elements it skips), which makes
//! positional queries as cheap as searches.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod script;
pub mod skip_set;

pub use compare::{Compare, Natural};
pub use error::Error;
pub use order_statistic::Rank;
pub use skip_set::{Cursor, SkipSet};
