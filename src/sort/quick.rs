//! Randomized quicksort and the quicksort/insertion-sort hybrid.
//!
//! Both share one driver: ranges of length 2 and 3 are finished by the
//! base-case sorts, larger ranges pick a median-of-three pivot, park it at
//! `high`, partition, and queue the two sides. The hybrid hands any range of
//! at most [`HYBRID_THRESHOLD`] elements to insertion sort instead.
//!
//! Pending ranges live on a heap-allocated work stack, so inputs that
//! degrade to linear depth (all-equal keys, unlucky pivots) cannot overflow
//! the call stack.

use rand::Rng;

use crate::error::Result;

use super::partition::partition;
use super::pivot::median_of_three;
use super::{is_sorted_range, range_len};
use super::small::{insertion_sort, sort2, sort3};

/// Ranges at or below this length go to insertion sort in [`hybrid_sort`].
pub const HYBRID_THRESHOLD: usize = 10;

/// Sort `[low, high]` ascending with randomized quicksort.
pub fn randomized_quick_sort<T, R>(seq: &mut [T], low: usize, high: usize, rng: &mut R) -> Result<()>
where
    T: PartialOrd,
    R: Rng + ?Sized,
{
    sort_ranges(seq, low, high, rng, None)
}

/// Sort `[low, high]` ascending with quicksort, switching to insertion sort
/// for ranges of at most [`HYBRID_THRESHOLD`] elements.
pub fn hybrid_sort<T, R>(seq: &mut [T], low: usize, high: usize, rng: &mut R) -> Result<()>
where
    T: PartialOrd,
    R: Rng + ?Sized,
{
    sort_ranges(seq, low, high, rng, Some(HYBRID_THRESHOLD))
}

fn sort_ranges<T, R>(
    seq: &mut [T],
    low: usize,
    high: usize,
    rng: &mut R,
    insertion_cutoff: Option<usize>,
) -> Result<()>
where
    T: PartialOrd,
    R: Rng + ?Sized,
{
    if range_len(seq.len(), low, high)?.is_none() {
        return Ok(());
    }

    let mut pending = vec![(low, high)];
    while let Some((lo, hi)) = pending.pop() {
        match hi - lo + 1 {
            1 => continue,
            2 => {
                sort2(seq, lo, hi)?;
                continue;
            }
            3 => {
                sort3(seq, lo)?;
                continue;
            }
            len if insertion_cutoff.is_some_and(|cutoff| len <= cutoff) => {
                insertion_sort(seq, lo, hi, false)?;
                continue;
            }
            _ => {}
        }

        let pivot = median_of_three(seq, lo, hi, rng)?;
        seq.swap(pivot, hi);
        let p = partition(seq, lo, hi)?;

        // Right side pushed first so the left side is sorted first.
        if p < hi {
            pending.push((p + 1, hi));
        }
        if p > lo {
            pending.push((lo, p - 1));
        }
    }
    debug_assert!(is_sorted_range(seq, low, high, false));
    Ok(())
}
