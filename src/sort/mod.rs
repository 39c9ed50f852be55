//! In-memory sorting algorithms over inclusive index ranges `[low, high]`.
//!
//! Every entry point mutates the slice in place and reports failures
//! (out-of-bounds range, incomparable elements) through [`crate::Result`].
//! Ranges with fewer than two elements, including `high < low`, are a no-op.

pub mod bucket;
pub mod merge;
pub mod partition;
pub mod pivot;
pub mod quick;
pub mod small;


use std::cmp::Ordering;

use crate::error::{Result, SortError};

pub use self::bucket::{Elem, bucket_sort};
pub use self::merge::iterative_merge_sort;
pub use self::partition::partition;
pub use self::pivot::{create_rng, median_of_three};
pub use self::quick::{HYBRID_THRESHOLD, hybrid_sort, randomized_quick_sort};
pub use self::small::{insertion_sort, sort2, sort3};

/// Compare the elements at indices `a` and `b`.
#[inline]
pub(crate) fn compare<T: PartialOrd>(seq: &[T], a: usize, b: usize) -> Result<Ordering> {
    seq[a]
        .partial_cmp(&seq[b])
        .ok_or(SortError::Incomparable { left: a, right: b })
}

/// `seq[a] >= seq[b]`
#[inline]
pub(crate) fn ge<T: PartialOrd>(seq: &[T], a: usize, b: usize) -> Result<bool> {
    Ok(compare(seq, a, b)? != Ordering::Less)
}

/// `seq[a] > seq[b]`
#[inline]
pub(crate) fn gt<T: PartialOrd>(seq: &[T], a: usize, b: usize) -> Result<bool> {
    Ok(compare(seq, a, b)? == Ordering::Greater)
}

/// `seq[a] <= seq[b]`
#[inline]
pub(crate) fn le<T: PartialOrd>(seq: &[T], a: usize, b: usize) -> Result<bool> {
    Ok(compare(seq, a, b)? != Ordering::Greater)
}

/// Length of `[low, high]`, or `None` when the range holds fewer than two
/// elements. Errors if a non-trivial range runs past the end of the slice.
#[inline]
pub(crate) fn range_len(len: usize, low: usize, high: usize) -> Result<Option<usize>> {
    if high <= low {
        return Ok(None);
    }
    if high >= len {
        return Err(SortError::RangeOutOfBounds { high, len });
    }
    Ok(Some(high - low + 1))
}

/// Check whether `[low, high]` is in ascending (or descending) order.
pub fn is_sorted_range<T: PartialOrd>(
    seq: &[T],
    low: usize,
    high: usize,
    reversed: bool,
) -> bool {
    if high <= low || high >= seq.len() {
        return high <= low;
    }
    seq[low..=high].windows(2).all(|w| {
        if reversed { w[0] >= w[1] } else { w[0] <= w[1] }
    })
}
