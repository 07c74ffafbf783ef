//! Core traits and types for lockstep sorting.
//!
//! This module defines:
//! - [`Sequence`]: anything that can be reordered by a [`Permutation`]. Companion
//!   sequences are passed to the sorter as `&mut dyn Sequence`, so one group can
//!   mix element types.
//! - [`ByteKeys`]: zero-copy access to byte-string keys for the prefix-caching engine.
//! - SortPtr: Internal pointer/cache structure.

use crate::permutation::Permutation;
use std::collections::VecDeque;

/// Size of the prefix to be cached in the sort pointer.
pub const PREFIX_SIZE: usize = 8;

/// Pointer to a key, storing its original index and cached 8-byte prefix.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SortPtr {
    pub index: usize,
    pub cache: u64,
}

/// A sequence whose elements can be reordered in place.
///
/// The trait is object safe. A group of parallel sequences with different
/// element types is expressed as a slice of `&mut dyn Sequence`.
///
/// # Examples
///
/// ```
/// use lockstep::{Permutation, Sequence};
///
/// let mut gpas = vec![4.0, 3.1, 2.7];
/// let perm = Permutation::from_indices(vec![2, 1, 0]).unwrap();
///
/// gpas.permute(&perm);
/// assert_eq!(gpas, vec![2.7, 3.1, 4.0]);
/// ```
pub trait Sequence {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reorders the elements so that `self[k]` becomes the element previously
    /// at `perm[k]`.
    ///
    /// Callers must ensure `perm.len() == self.len()`; the sorter checks this for
    /// the whole group before any sequence is touched.
    fn permute(&mut self, perm: &Permutation);
}

impl<T> Sequence for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn permute(&mut self, perm: &Permutation) {
        crate::algo::apply_permutation(self, perm.as_slice());
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn permute(&mut self, perm: &Permutation) {
        crate::algo::apply_permutation(self.as_mut_slice(), perm.as_slice());
    }
}

impl<T> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn permute(&mut self, perm: &Permutation) {
        crate::algo::apply_permutation(self.as_mut_slice(), perm.as_slice());
    }
}

impl<T> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn permute(&mut self, perm: &Permutation) {
        crate::algo::apply_permutation(self.make_contiguous(), perm.as_slice());
    }
}

/// A trait for accessing byte-string keys from a collection without copying.
///
/// The byte-key engine sorts any collection whose keys can be viewed as byte
/// slices (e.g., `Vec<String>`, `Vec<Vec<u8>>`, or columnar storage with an
/// offsets buffer). Keys compare lexicographically by byte, shorter keys first
/// when one is a prefix of the other.
///
/// # Examples
///
/// Implementing for a flat buffer:
///
/// ```
/// use lockstep::core::ByteKeys;
///
/// struct Column {
///     data: Vec<u8>,
///     offsets: Vec<usize>,
/// }
///
/// impl ByteKeys for Column {
///     fn key(&self, index: usize) -> &[u8] {
///         &self.data[self.offsets[index]..self.offsets[index + 1]]
///     }
///
///     fn len(&self) -> usize {
///         self.offsets.len() - 1
///     }
/// }
/// ```
pub trait ByteKeys {
    /// Returns the key at the given index.
    fn key(&self, index: usize) -> &[u8];

    /// Returns the number of keys.
    fn len(&self) -> usize;

    /// Returns `true` if there are no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the next 8 bytes of the key at `offset` as a big-endian `u64`.
    ///
    /// Bytes past the end of the key read as zero. Implementors with contiguous
    /// storage can override this to skip building the intermediate slice.
    #[inline(always)]
    fn prefix(&self, index: usize, offset: usize) -> u64 {
        let key = self.key(index);
        let len = key.len();

        if offset >= len {
            return 0;
        }

        let remaining = len - offset;
        let mut buf = [0u8; PREFIX_SIZE];
        let take = remaining.min(PREFIX_SIZE);
        buf[..take].copy_from_slice(&key[offset..offset + take]);
        u64::from_be_bytes(buf)
    }
}

impl<T: AsRef<[u8]>> ByteKeys for [T] {
    fn key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: AsRef<[u8]>> ByteKeys for Vec<T> {
    fn key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: AsRef<[u8]>> ByteKeys for VecDeque<T> {
    fn key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}
