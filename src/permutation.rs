//! The reordering shared by every sequence in a group.

use crate::algo::{self, stable_byte_indices, stable_indices, stable_indices_by};
use crate::config::SortOptions;
use crate::core::{ByteKeys, Sequence};
use crate::error::{Result, SortError};
use std::cmp::Ordering;

/// A bijective reindexing of `0..len`.
///
/// Applying a permutation `p` to a sequence `s` produces `out[k] = s[p[k]]`.
/// The permutations built by the `sorting*` constructors are those that stably
/// sort the given keys.
///
/// # Examples
///
/// ```
/// use lockstep::Permutation;
///
/// let names = ["Jennifer", "Alfred", "Jack"];
/// let perm = Permutation::sorting(&names).unwrap();
/// assert_eq!(perm.as_slice(), &[1, 2, 0]);
///
/// let mut gpas = [4.0, 3.1, 2.7];
/// perm.apply(&mut gpas).unwrap();
/// assert_eq!(gpas, [3.1, 2.7, 4.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Wraps raw indices, checking that each of `0..indices.len()` appears exactly once.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self> {
        let len = indices.len();
        let mut seen = vec![false; len];
        for (index, &target) in indices.iter().enumerate() {
            if target >= len || seen[target] {
                return Err(SortError::InvalidPermutation { len, index });
            }
            seen[target] = true;
        }
        Ok(Self(indices))
    }

    /// The permutation that stably sorts `keys` ascending.
    ///
    /// Fails with [`SortError::Incomparable`] if two keys cannot be ordered.
    pub fn sorting<T: PartialOrd>(keys: &[T]) -> Result<Self> {
        Self::sorting_with(keys, &SortOptions::default())
    }

    pub fn sorting_with<T: PartialOrd>(keys: &[T], options: &SortOptions) -> Result<Self> {
        stable_indices(keys, options.order, |a, b| a.partial_cmp(b)).map(Self)
    }

    /// The permutation that stably sorts `keys` under a total order.
    pub fn sorting_by<T, F>(keys: &[T], compare: F, options: &SortOptions) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        Self(stable_indices_by(keys, options.order, compare))
    }

    /// The permutation that stably sorts byte-string keys, using the prefix-caching engine.
    pub fn sorting_bytes<K: ByteKeys + ?Sized>(keys: &K, options: &SortOptions) -> Self {
        Self(stable_byte_indices(keys, options))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(k, &i)| k == i)
    }

    /// The permutation that undoes this one.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (k, &i) in self.0.iter().enumerate() {
            inverse[i] = k;
        }
        Self(inverse)
    }

    /// Reorders `data` in place.
    pub fn apply<T>(&self, data: &mut [T]) -> Result<()> {
        self.check_len(data.len(), 0)?;
        algo::apply_permutation(data, &self.0);
        Ok(())
    }

    /// Reorders any [`Sequence`] in place.
    pub fn apply_to(&self, sequence: &mut dyn Sequence) -> Result<()> {
        self.check_len(sequence.len(), 0)?;
        sequence.permute(self);
        Ok(())
    }

    pub(crate) fn check_len(&self, found: usize, sequence: usize) -> Result<()> {
        if found == self.0.len() {
            Ok(())
        } else {
            Err(SortError::LengthMismatch {
                sequence,
                expected: self.0.len(),
                found,
            })
        }
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Order;

    #[test]
    fn from_indices_rejects_repeats_and_out_of_range() {
        assert_eq!(
            Permutation::from_indices(vec![0, 2, 2]),
            Err(SortError::InvalidPermutation { len: 3, index: 2 })
        );
        assert_eq!(
            Permutation::from_indices(vec![3, 0, 1]),
            Err(SortError::InvalidPermutation { len: 3, index: 0 })
        );
        assert!(Permutation::from_indices(vec![]).unwrap().is_identity());
    }

    #[test]
    fn inverse_restores_input() {
        let original = vec!["d", "a", "c", "b"];
        let perm = Permutation::sorting(&original).unwrap();

        let mut data = original.clone();
        perm.apply(&mut data).unwrap();
        assert_eq!(data, vec!["a", "b", "c", "d"]);

        perm.inverse().apply(&mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn apply_checks_length() {
        let perm = Permutation::identity(2);
        let mut data = [1, 2, 3];
        assert_eq!(
            perm.apply(&mut data),
            Err(SortError::LengthMismatch {
                sequence: 0,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(data, [1, 2, 3]);
    }

    #[test]
    fn sorting_by_custom_comparator() {
        let words = ["ccc", "a", "bb", "dd"];
        let perm = Permutation::sorting_by(&words, |a, b| a.len().cmp(&b.len()), &SortOptions::default());
        assert_eq!(perm.as_slice(), &[1, 2, 3, 0]);

        let opts = SortOptions::default().with_order(Order::Descending);
        let perm = Permutation::sorting_by(&words, |a, b| a.len().cmp(&b.len()), &opts);
        assert_eq!(perm.as_slice(), &[0, 2, 3, 1]);
    }
}
