//! Error types for lockstep sorting.
//!
//! Every error is detected before any sequence in the group is modified, so a
//! returned error always means the caller's data is untouched.

use std::error::Error;
use std::fmt;

/// Error type for group sorts and permutation construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A sequence in the group does not have the key sequence's length.
    LengthMismatch {
        /// Position of the offending sequence in the group (the key is 0).
        sequence: usize,
        /// Length of the key sequence.
        expected: usize,
        /// Length of the offending sequence.
        found: usize,
    },

    /// Two key elements cannot be ordered against each other.
    ///
    /// `left == right` when an element is not even comparable to itself,
    /// which is how a NaN float shows up.
    Incomparable {
        /// Position of the first element in the key sequence.
        left: usize,
        /// Position of the second element in the key sequence.
        right: usize,
    },

    /// The indices handed to `Permutation::from_indices` are not a bijection.
    InvalidPermutation {
        /// Number of indices given.
        len: usize,
        /// Position of the first out-of-range or repeated index.
        index: usize,
    },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                sequence,
                expected,
                found,
            } => write!(
                f,
                "length mismatch: sequence {sequence} has {found} elements, key has {expected}"
            ),
            Self::Incomparable { left, right } if left == right => {
                write!(f, "key element {left} is not comparable to itself")
            }
            Self::Incomparable { left, right } => {
                write!(f, "key elements {left} and {right} are not comparable")
            }
            Self::InvalidPermutation { len, index } => write!(
                f,
                "invalid permutation: entry {index} is out of range or repeated (len {len})"
            ),
        }
    }
}

impl Error for SortError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SortError>;
