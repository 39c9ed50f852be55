//! Two-pointer partition around a pivot parked at the end of the range.

use crate::error::Result;

use super::{ge, gt, le};

/// Partition `[low, high]` around the pivot value stored at `seq[high]`.
///
/// Returns the pivot's final index `p`: everything in `[low, p)` is `<=` the
/// pivot and everything in `(p, high]` is `>` it.
///
/// The left scan never advances past `high - 1` and the right scan never
/// retreats past `low`; both stop at those fence posts without testing the
/// element there. When the scans meet, the element under the left pointer
/// decides where the pivot lands: if it is `<=` the pivot the pivot stays at
/// `high`, otherwise the two trade places. With many equal keys this sends
/// the pivot to `high`, so runs of duplicates shrink the range by one per
/// partition.
pub fn partition<T: PartialOrd>(seq: &mut [T], low: usize, high: usize) -> Result<usize> {
    if high <= low {
        return Ok(high);
    }

    let mut left = low;
    let mut right = high - 1;

    loop {
        while left < high - 1 && le(seq, left, high)? {
            left += 1;
        }
        while right > low && gt(seq, right, high)? {
            right -= 1;
        }

        if left >= right {
            if ge(seq, high, left)? {
                return Ok(high);
            }
            seq.swap(left, high);
            return Ok(left);
        }

        seq.swap(left, right);
    }
}
