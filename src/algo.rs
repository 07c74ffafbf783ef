//! Index-sorting engines and in-place permutation.
//!
//! Both engines return the indices `0..len` ordered so that reading the keys
//! through them yields a sorted sequence. Ties are always resolved by original
//! index, which makes every result stable and deterministic.
//!
//! - [`stable_indices`] and [`stable_indices_by`]: any key type, driven by a
//!   fallible or a total comparator.
//! - [`stable_byte_indices`]: byte-string keys. Quicksort with Common Prefix
//!   Skipping over 8-byte cached prefixes, switching to an adaptive radix step
//!   for large partitions.
//! - [`apply_permutation`]: cycle-walking application of the result to a slice.

use crate::config::{Order, SortOptions};
use crate::core::{ByteKeys, PREFIX_SIZE, SortPtr};
use crate::error::{Result, SortError};
use cuneiform::cuneiform;
use log::trace;
use std::cmp::Ordering;

#[inline(always)]
pub(crate) fn directed(ord: Ordering, order: Order) -> Ordering {
    match order {
        Order::Ascending => ord,
        Order::Descending => ord.reverse(),
    }
}

/// Stably sorts the positions `0..len` with a total comparator over positions.
fn sort_positions<F>(len: usize, order: Order, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    // Fast path: already in order
    if (1..len).all(|i| directed(compare(i - 1, i), order) != Ordering::Greater) {
        return (0..len).collect();
    }

    // `sort_by` is stable and the positions start in input order.
    let mut indices: Vec<usize> = (0..len).collect();
    indices.sort_by(|&a, &b| directed(compare(a, b), order));
    indices
}

/// Stably sorts the positions of `keys` under a total order.
pub(crate) fn stable_indices_by<T, F>(keys: &[T], order: Order, mut compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_positions(keys.len(), order, |a, b| compare(&keys[a], &keys[b]))
}

/// Stably sorts the positions of `keys` with a comparator that may refuse to order a pair.
///
/// Elements that are not comparable to themselves are rejected before sorting
/// starts. The sort itself is a bottom-up merge that stops at the first refused
/// comparison, so an inconsistent order never reaches `slice::sort_by`. A
/// successful result is checked pairwise: with every neighbour comparable, the
/// whole key sequence is.
pub(crate) fn stable_indices<T, F>(keys: &[T], order: Order, mut compare: F) -> Result<Vec<usize>>
where
    F: FnMut(&T, &T) -> Option<Ordering>,
{
    if let Some(bad) = keys.iter().position(|k| compare(k, k).is_none()) {
        return Err(SortError::Incomparable {
            left: bad,
            right: bad,
        });
    }

    try_sort_positions(keys.len(), order, |a, b| compare(&keys[a], &keys[b]))
        .map_err(|(left, right)| SortError::Incomparable { left, right })
}

/// Stable merge sort over positions that aborts with the refused pair `(min, max)`.
fn try_sort_positions<F>(
    len: usize,
    order: Order,
    mut compare: F,
) -> std::result::Result<Vec<usize>, (usize, usize)>
where
    F: FnMut(usize, usize) -> Option<Ordering>,
{
    let mut cmp = |a: usize, b: usize| {
        compare(a, b)
            .map(|o| directed(o, order))
            .ok_or((a.min(b), a.max(b)))
    };

    // Fast path: already in order. Also checks every neighbour is comparable.
    let mut in_order = true;
    for i in 1..len {
        if cmp(i - 1, i)? == Ordering::Greater {
            in_order = false;
            break;
        }
    }
    if in_order {
        return Ok((0..len).collect());
    }

    let mut src: Vec<usize> = (0..len).collect();
    let mut dst = vec![0usize; len];
    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j, mut k) = (start, mid, start);

            // Right run wins only when strictly smaller, which keeps ties in input order.
            while i < mid && j < end {
                if cmp(src[j], src[i])? == Ordering::Less {
                    dst[k] = src[j];
                    j += 1;
                } else {
                    dst[k] = src[i];
                    i += 1;
                }
                k += 1;
            }
            dst[k..k + (mid - i)].copy_from_slice(&src[i..mid]);
            k += mid - i;
            dst[k..end].copy_from_slice(&src[j..end]);
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }

    for w in src.windows(2) {
        cmp(w[0], w[1])?;
    }
    Ok(src)
}

/// Stably sorts the positions of byte-string keys.
///
/// # Returns
///
/// A vector of indices such that `keys.key(indices[i]) <= keys.key(indices[i+1])`
/// (reversed for [`Order::Descending`]), with equal keys in input order.
pub(crate) fn stable_byte_indices<K: ByteKeys + ?Sized>(keys: &K, options: &SortOptions) -> Vec<usize> {
    let len = keys.len();
    if len == 0 {
        return vec![];
    }

    // Initialize SortPtrs with the first 8 bytes.
    let mut pointers: Vec<SortPtr> = (0..len)
        .map(|index| SortPtr {
            index,
            cache: keys.prefix(index, 0),
        })
        .collect();

    let engine = ByteEngine {
        keys,
        order: options.order,
        radix_threshold: options.radix_threshold,
    };
    engine.cps_quicksort(&mut pointers, 0, true);

    pointers.into_iter().map(|p| p.index).collect()
}

/// Reorders `data` in place so that `data[k]` becomes the element previously at `perm[k]`.
///
/// Walks each cycle of the permutation once, swapping along it, so no element
/// is cloned. `perm` must be a bijection on `0..data.len()`.
pub(crate) fn apply_permutation<T>(data: &mut [T], perm: &[usize]) {
    debug_assert_eq!(data.len(), perm.len());

    let mut placed = vec![false; data.len()];
    for start in 0..data.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true; // Mark as visited/placed
            let next = perm[current];
            if next == start {
                break;
            }
            data.swap(current, next);
            current = next;
        }
    }
}

/// Number of buckets for Radix sort (256 for byte-wise).
const RADIX_BUCKETS: usize = 256;

// Cache-aligned counts struct.
#[cuneiform]
struct RadixCounts {
    data: [usize; RADIX_BUCKETS],
}

struct ByteEngine<'k, K: ?Sized> {
    keys: &'k K,
    order: Order,
    radix_threshold: usize,
}

impl<K: ByteKeys + ?Sized> ByteEngine<'_, K> {
    /// Common Prefix Skipping Quicksort (CPS-QS).
    ///
    /// * `cp_len`: The length of the common prefix shared by all keys in this slice.
    /// * `allow_radix`: Whether the radix step may be taken for a large slice.
    fn cps_quicksort(&self, ptrs: &mut [SortPtr], cp_len: usize, allow_radix: bool) {
        let len = ptrs.len();

        if allow_radix && len > 1 && len > self.radix_threshold {
            self.aqs_radix(ptrs, cp_len);
            return;
        }

        // Index tie-break makes the comparator total, so the unstable sort yields a stable order.
        ptrs.sort_unstable_by(|a, b| {
            directed(self.compare_entries(a, b, cp_len), self.order)
                .then_with(|| a.index.cmp(&b.index))
        });
    }

    /// Adaptive Radix Sort Step.
    ///
    /// 1. Skips bytes shared by every key in the slice.
    /// 2. Counts frequencies of the next byte (from cache).
    /// 3. Places pointers into buckets, visiting buckets in output order. Placement
    ///    keeps input order inside each bucket.
    /// 4. Recursively calls `cps_quicksort` on each bucket.
    fn aqs_radix(&self, ptrs: &mut [SortPtr], mut cp_len: usize) {
        let mut bytes_since_load = 0;

        loop {
            // Block skip: find how many leading cached bytes are identical across the slice.
            let anchor = ptrs[0].cache;
            let diff = ptrs.iter().fold(0, |acc, p| acc | (p.cache ^ anchor));
            let common_bytes = (diff.leading_zeros() / 8) as usize;

            if common_bytes > 0 {
                // Stop at the first zero byte: it may be end-of-key padding, and
                // skipping it would recurse forever on short keys.
                let safe_bytes = (0..common_bytes)
                    .take_while(|i| (anchor >> (56 - i * 8)) as u8 != 0)
                    .count();

                if safe_bytes > 0 {
                    cp_len += safe_bytes;
                    bytes_since_load += safe_bytes;

                    if bytes_since_load >= PREFIX_SIZE {
                        self.update_caches(ptrs, cp_len);
                        bytes_since_load = 0;
                    } else {
                        let shift_bits = safe_bytes * 8;
                        ptrs.iter_mut().for_each(|p| p.cache <<= shift_bits);
                    }
                    continue;
                }
            }

            trace!("radix step over {} keys at prefix {}", ptrs.len(), cp_len);

            let mut counts = RadixCounts {
                data: [0; RADIX_BUCKETS],
            };
            let counts = &mut counts.data;

            // cache >> 56 extracts the most significant byte (big-endian prefix)
            ptrs.iter().for_each(|p| {
                counts[(p.cache >> 56) as usize] += 1;
            });

            let mut buckets: [usize; RADIX_BUCKETS] = std::array::from_fn(|b| b);
            if self.order == Order::Descending {
                buckets.reverse();
            }

            let mut offsets = [0usize; RADIX_BUCKETS];
            let mut sum = 0;
            buckets.iter().for_each(|&b| {
                offsets[b] = sum;
                sum += counts[b];
            });

            let buffer = ptrs.to_vec();
            buffer.iter().for_each(|p| {
                let b = (p.cache >> 56) as usize;
                ptrs[offsets[b]] = *p;
                offsets[b] += 1;
            });

            let total_len = ptrs.len();
            let new_cp = cp_len + 1;
            let mut start = 0;
            buckets.iter().for_each(|&b| {
                let end = start + counts[b];
                if end > start {
                    let bucket = &mut ptrs[start..end];
                    self.update_caches(bucket, new_cp);

                    let is_degenerate = (end - start) == total_len;
                    self.cps_quicksort(bucket, new_cp, !is_degenerate);
                }
                start = end;
            });

            break;
        }
    }

    /// Reloads caches so each holds the next 8 bytes of its key starting at `new_cp`.
    fn update_caches(&self, ptrs: &mut [SortPtr], new_cp: usize) {
        ptrs.iter_mut().for_each(|p| {
            p.cache = self.keys.prefix(p.index, new_cp);
        });
    }

    /// Compares two keys known to agree on their first `offset` bytes.
    ///
    /// 1. **Fast path**: Compares cached `u64` values.
    /// 2. **Slow path**: If caches match, compares the key bytes past the cached window.
    /// 3. Handles keys that end inside the cached window, where padding is ambiguous.
    #[inline(always)]
    fn compare_entries(&self, a: &SortPtr, b: &SortPtr, offset: usize) -> Ordering {
        if a.cache != b.cache {
            return a.cache.cmp(&b.cache);
        }

        let key_a = self.keys.key(a.index);
        let key_b = self.keys.key(b.index);

        let start_safe = offset + PREFIX_SIZE;

        let (slice_a, slice_b) = if key_a.len() < start_safe || key_b.len() < start_safe {
            (tail(key_a, offset), tail(key_b, offset))
        } else {
            (&key_a[start_safe..], &key_b[start_safe..])
        };

        match slice_a.cmp(slice_b) {
            Ordering::Equal => key_a.len().cmp(&key_b.len()),
            other => other,
        }
    }
}

fn tail(key: &[u8], offset: usize) -> &[u8] {
    if offset < key.len() { &key[offset..] } else { &[] }
}
