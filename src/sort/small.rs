//! Base cases for tiny ranges and the insertion sort primitive.

use crate::error::{Result, SortError};

use super::{ge, gt, range_len};

/// Order two elements ascending, swapping only when `seq[a] > seq[b]`.
#[inline]
pub fn sort2<T: PartialOrd>(seq: &mut [T], a: usize, b: usize) -> Result<()> {
    let high = a.max(b);
    if high >= seq.len() {
        return Err(SortError::RangeOutOfBounds {
            high,
            len: seq.len(),
        });
    }
    if gt(seq, a, b)? {
        seq.swap(a, b);
    }
    Ok(())
}

/// Sort the three consecutive elements starting at `low`.
///
/// A full decision tree over the six possible orderings; each leaf applies
/// the one permutation that puts the values in place. Ties resolve as if
/// the earlier element were the larger one, so `[2, 2, 1]` becomes
/// `[1, 2, 2]`. An ascending triple ends with the same values in each slot,
/// though equal values may trade places.
pub fn sort3<T: PartialOrd>(seq: &mut [T], low: usize) -> Result<()> {
    let r = low.saturating_add(2);
    if r >= seq.len() {
        return Err(SortError::RangeOutOfBounds {
            high: r,
            len: seq.len(),
        });
    }
    let (l, i) = (low, low + 1);

    if ge(seq, l, i)? {
        if ge(seq, l, r)? {
            if ge(seq, i, r)? {
                // l >= i >= r
                seq[l..=r].swap(0, 2);
            } else {
                // l >= r > i
                seq[l..=r].rotate_left(1);
            }
        } else {
            // r > l >= i
            seq[l..=r].swap(0, 1);
        }
    } else if ge(seq, i, r)? {
        if ge(seq, l, r)? {
            // i > l >= r
            seq[l..=r].rotate_right(1);
        } else {
            // i >= r > l
            seq[l..=r].swap(1, 2);
        }
    }
    // else r > i > l: already in order
    Ok(())
}

/// Insertion sort over `[low, high]`.
///
/// Each element moves left past every strictly greater predecessor
/// (strictly smaller when `reversed`), so equal elements keep their
/// relative order.
pub fn insertion_sort<T: PartialOrd>(
    seq: &mut [T],
    low: usize,
    high: usize,
    reversed: bool,
) -> Result<()> {
    if range_len(seq.len(), low, high)?.is_none() {
        return Ok(());
    }

    for i in low + 1..=high {
        let mut j = i;
        while j > low {
            let out_of_order = if reversed {
                gt(seq, j, j - 1)?
            } else {
                gt(seq, j - 1, j)?
            };
            if !out_of_order {
                break;
            }
            seq.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}
