//! # Lockstep
//!
//! `lockstep` sorts several parallel sequences together. The first sequence of
//! a group is the key: the permutation that stably sorts it is computed once and
//! applied to every sequence in the group, so row `k` of every sequence still
//! describes the same record afterwards.
//!
//! ## Key Features
//!
//! - **Stable**: keys that compare equal keep their input order, in both
//!   ascending and descending sorts, and that order is imposed on every companion.
//! - **All-or-nothing**: lengths are validated and the permutation is computed
//!   before any sequence is touched. An error leaves the whole group unchanged.
//! - **Heterogeneous groups**: companions are `&mut dyn` [`Sequence`], so one group
//!   can hold `Vec<String>`, `Vec<f64>`, `VecDeque<u32>` and fixed-size arrays side by side.
//! - **No `Clone` bound**: permutations are applied in place by swapping along cycles.
//! - **Byte-string keys**: [`sort_all_bytes`] uses a prefix-caching engine (8-byte
//!   prefixes held next to each index, common-prefix skipping, adaptive radix step
//!   on large partitions). The [`ByteKeys`] trait lets it read keys from columnar
//!   storage without copying.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use lockstep::sort_all;
//!
//! let mut names = vec!["Jennifer", "Alfred", "Jack"];
//! let mut gpas = vec![4.0, 3.1, 2.7];
//!
//! // Sort by name.
//! sort_all!(names, gpas).unwrap();
//! assert_eq!(names, vec!["Alfred", "Jack", "Jennifer"]);
//! assert_eq!(gpas, vec![3.1, 2.7, 4.0]);
//!
//! // Sort by GPA this time.
//! sort_all!(gpas, names).unwrap();
//! assert_eq!(gpas, vec![2.7, 3.1, 4.0]);
//! assert_eq!(names, vec!["Jack", "Alfred", "Jennifer"]);
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use lockstep::{sort_all, SortError};
//!
//! let mut a = vec![1, 2];
//! let mut b = vec![3, 4, 5];
//!
//! let err = sort_all!(a, b).unwrap_err();
//! assert_eq!(err, SortError::LengthMismatch { sequence: 1, expected: 2, found: 3 });
//! assert_eq!(b, vec![3, 4, 5]);
//! ```
//!
//! ### Undoing a sort
//!
//! ```rust
//! use lockstep::sort_all;
//!
//! let mut scores = vec![30, 10, 20];
//! let mut ids = vec!['c', 'a', 'b'];
//!
//! let perm = sort_all!(scores, ids).unwrap();
//! perm.inverse().apply(&mut ids).unwrap();
//! assert_eq!(ids, vec!['c', 'a', 'b']);
//! ```
//!
//! ## Performance Characteristics
//!
//! - O(L log L) key comparisons, plus O(L) swaps per sequence.
//! - An already sorted key is detected in one pass and nothing is moved.
//! - **Memory Overhead**: one index vector for the permutation (`8 bytes` per row),
//!   `16 bytes` per row for the byte-key engine, and one visited flag per row while applying.

mod algo;
pub mod config;
pub mod core;
pub mod error;
pub mod group;
pub mod permutation;

pub use crate::config::{Order, RADIX_SORT_THRESHOLD, SortOptions};
pub use crate::core::{ByteKeys, Sequence};
pub use crate::error::{Result, SortError};
pub use crate::group::{SequenceGroup, sort_all, sort_all_by, sort_all_bytes, sort_all_with};
pub use crate::permutation::Permutation;

/// Sorts a group of sequences by the first one.
///
/// `sort_all!(key, a, b, ...)` is shorthand for
/// `sort_all(&mut key, &mut [&mut a, &mut b, ...])`. Each argument must be a place
/// expression naming a [`Sequence`]; the key must also deref to a slice of
/// `PartialOrd` elements.
#[macro_export]
macro_rules! sort_all {
    ($key:expr $(, $companion:expr)* $(,)?) => {
        $crate::sort_all(
            &mut $key,
            &mut [$(&mut $companion as &mut dyn $crate::Sequence),*],
        )
    };
}

/// Glob-importable re-exports of the public API.
pub mod prelude {
    pub use crate::config::{Order, SortOptions};
    pub use crate::core::{ByteKeys, Sequence};
    pub use crate::error::SortError;
    pub use crate::group::{SequenceGroup, sort_all, sort_all_by, sort_all_bytes};
    pub use crate::permutation::Permutation;
}
