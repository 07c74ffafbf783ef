//! Sorting a group of parallel sequences in lockstep.
//!
//! The first sequence of a group is the key. The permutation that stably sorts
//! it is computed once and applied to every sequence in the group, key included.
//!
//! Every operation validates first and commits second: lengths are checked and
//! the permutation is computed before any sequence is touched, so an error leaves
//! the whole group exactly as it was.

use crate::algo;
use crate::config::SortOptions;
use crate::core::Sequence;
use crate::error::{Result, SortError};
use crate::permutation::Permutation;
use log::debug;
use std::cmp::Ordering;

/// Sorts `key` ascending and reorders every companion the same way.
///
/// Mirrors the classic `sort_all([names, gpas])` idiom: the sequences are
/// mutated in place and the permutation that was applied is returned, so the
/// caller can undo it with [`Permutation::inverse`].
///
/// # Errors
///
/// * [`SortError::LengthMismatch`] if a companion's length differs from the key's.
/// * [`SortError::Incomparable`] if two keys cannot be ordered (e.g. a NaN).
///
/// On error no sequence is modified.
///
/// # Examples
///
/// ```
/// use lockstep::sort_all;
///
/// let mut names = vec!["Jennifer", "Alfred", "Jack"];
/// let mut gpas = vec![4.0, 3.1, 2.7];
///
/// sort_all(&mut names, &mut [&mut gpas]).unwrap();
///
/// assert_eq!(names, vec!["Alfred", "Jack", "Jennifer"]);
/// assert_eq!(gpas, vec![3.1, 2.7, 4.0]);
/// ```
pub fn sort_all<T: PartialOrd>(
    key: &mut [T],
    companions: &mut [&mut dyn Sequence],
) -> Result<Permutation> {
    sort_all_with(key, companions, &SortOptions::default())
}

/// [`sort_all`] with explicit [`SortOptions`].
pub fn sort_all_with<T: PartialOrd>(
    key: &mut [T],
    companions: &mut [&mut dyn Sequence],
    options: &SortOptions,
) -> Result<Permutation> {
    validate(key.len(), companions)?;
    let perm = Permutation::sorting_with(key, options).inspect_err(|e| {
        debug!("Group sort rejected: {e}");
    })?;
    Ok(commit(key, companions, perm))
}

/// Sorts `key` with a total comparator and reorders every companion the same way.
///
/// Only [`SortError::LengthMismatch`] can be returned.
pub fn sort_all_by<T, F>(
    key: &mut [T],
    companions: &mut [&mut dyn Sequence],
    compare: F,
) -> Result<Permutation>
where
    F: FnMut(&T, &T) -> Ordering,
{
    validate(key.len(), companions)?;
    let perm = Permutation::sorting_by(key, compare, &SortOptions::default());
    Ok(commit(key, companions, perm))
}

/// Sorts byte-string keys with the prefix-caching engine and reorders every companion.
///
/// Keys order lexicographically by byte. For `str` keys that is the same order
/// as `str::cmp`.
///
/// ```
/// use lockstep::sort_all_bytes;
///
/// let mut hosts = vec!["db-2", "api-1", "db-1"];
/// let mut ports = vec![5433, 8080, 5432];
///
/// sort_all_bytes(&mut hosts, &mut [&mut ports]).unwrap();
///
/// assert_eq!(hosts, vec!["api-1", "db-1", "db-2"]);
/// assert_eq!(ports, vec![8080, 5432, 5433]);
/// ```
pub fn sort_all_bytes<T: AsRef<[u8]>>(
    key: &mut [T],
    companions: &mut [&mut dyn Sequence],
) -> Result<Permutation> {
    validate(key.len(), companions)?;
    let perm = Permutation::sorting_bytes(&*key, &SortOptions::default());
    Ok(commit(key, companions, perm))
}

/// A key sequence plus the companions that follow its order.
///
/// A builder for when the group is assembled piece by piece, or when sort
/// options are needed. Sorting consumes the group and releases the borrows.
///
/// ```
/// use lockstep::{Order, SequenceGroup, SortOptions};
///
/// let mut gpas = vec![4.0, 3.1, 2.7];
/// let mut names = vec!["Jennifer", "Alfred", "Jack"];
///
/// SequenceGroup::new(&mut gpas)
///     .with(&mut names)
///     .options(SortOptions::default().with_order(Order::Descending))
///     .sort()
///     .unwrap();
///
/// assert_eq!(gpas, vec![4.0, 3.1, 2.7]);
/// assert_eq!(names, vec!["Jennifer", "Alfred", "Jack"]);
/// ```
pub struct SequenceGroup<'a, T> {
    key: &'a mut [T],
    companions: Vec<&'a mut dyn Sequence>,
    options: SortOptions,
}

impl<'a, T> SequenceGroup<'a, T> {
    /// Starts a group keyed by `key`.
    pub fn new(key: &'a mut [T]) -> Self {
        Self {
            key,
            companions: Vec::new(),
            options: SortOptions::default(),
        }
    }

    /// Adds a companion sequence.
    pub fn with(mut self, companion: &'a mut dyn Sequence) -> Self {
        self.companions.push(companion);
        self
    }

    /// Replaces the sort options.
    pub fn options(mut self, options: SortOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of sequences in the group, key included.
    pub fn sequence_count(&self) -> usize {
        self.companions.len() + 1
    }

    /// Length of the key sequence.
    pub fn sequence_len(&self) -> usize {
        self.key.len()
    }

    /// Checks that every companion matches the key length, returning that length.
    pub fn validate(&self) -> Result<usize> {
        validate(self.key.len(), &self.companions)
    }

    /// Sorts by the key's natural order in the configured direction.
    pub fn sort(mut self) -> Result<Permutation>
    where
        T: PartialOrd,
    {
        sort_all_with(self.key, &mut self.companions, &self.options)
    }

    /// Sorts with a total comparator in the configured direction.
    pub fn sort_by<F>(mut self, compare: F) -> Result<Permutation>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.validate()?;
        let perm = Permutation::sorting_by(self.key, compare, &self.options);
        Ok(commit(self.key, &mut self.companions, perm))
    }

    /// Sorts byte-string keys with the prefix-caching engine.
    pub fn sort_bytes(mut self) -> Result<Permutation>
    where
        T: AsRef<[u8]>,
    {
        self.validate()?;
        let perm = Permutation::sorting_bytes(&*self.key, &self.options);
        Ok(commit(self.key, &mut self.companions, perm))
    }
}

fn validate(expected: usize, companions: &[&mut dyn Sequence]) -> Result<usize> {
    for (i, companion) in companions.iter().enumerate() {
        let found = companion.len();
        if found != expected {
            let err = SortError::LengthMismatch {
                sequence: i + 1,
                expected,
                found,
            };
            debug!("Group sort rejected: {err}");
            return Err(err);
        }
    }
    Ok(expected)
}

fn commit<T>(key: &mut [T], companions: &mut [&mut dyn Sequence], perm: Permutation) -> Permutation {
    if perm.is_identity() {
        debug!(
            "Group of {} sequences x {} elements already in order",
            companions.len() + 1,
            key.len()
        );
        return perm;
    }

    algo::apply_permutation(key, perm.as_slice());
    companions.iter_mut().for_each(|c| c.permute(&perm));

    debug!(
        "Sorted group of {} sequences x {} elements",
        companions.len() + 1,
        key.len()
    );
    perm
}
