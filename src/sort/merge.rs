//! Bottom-up iterative merge sort for power-of-two lengths.

use crate::error::{Result, SortError};

use super::le;

/// Bottom-up merge sort over the whole slice, without recursion.
///
/// Runs of width 2, 4, 8, ... are merged pass by pass through one scratch
/// buffer. Only power-of-two lengths are accepted. Ties take the element
/// from the left run, so the sort is stable.
pub fn iterative_merge_sort<T: PartialOrd + Clone>(seq: &mut [T]) -> Result<()> {
    let n = seq.len();
    if n < 2 {
        return Ok(());
    }
    if !n.is_power_of_two() {
        return Err(SortError::NotPowerOfTwo { len: n });
    }

    let mut scratch: Vec<T> = Vec::with_capacity(n);
    let mut width = 2;
    while width <= n {
        scratch.clear();
        let half = width / 2;

        for start in (0..n).step_by(width) {
            let (mut left, left_end) = (start, start + half);
            let (mut right, right_end) = (start + half, start + width);

            while left < left_end || right < right_end {
                let take_left = if right >= right_end {
                    true
                } else if left >= left_end {
                    false
                } else {
                    le(seq, left, right)?
                };

                if take_left {
                    scratch.push(seq[left].clone());
                    left += 1;
                } else {
                    scratch.push(seq[right].clone());
                    right += 1;
                }
            }
        }

        seq.clone_from_slice(&scratch);
        width *= 2;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sort_power_of_two() {
        let mut seq = vec![8, 3, 5, 1, 7, 2, 6, 4];
        iterative_merge_sort(&mut seq).unwrap();
        assert_eq!(seq, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_merge_sort_trivial_lengths() {
        let mut empty: Vec<i32> = vec![];
        iterative_merge_sort(&mut empty).unwrap();
        let mut one = vec![1];
        iterative_merge_sort(&mut one).unwrap();
        assert_eq!(one, vec![1]);
    }

    #[test]
    fn test_merge_sort_rejects_odd_length() {
        let mut seq = vec![3, 2, 1];
        let err = iterative_merge_sort(&mut seq).unwrap_err();
        assert!(matches!(err, SortError::NotPowerOfTwo { len: 3 }));
        assert_eq!(seq, vec![3, 2, 1]);
    }

    #[test]
    fn test_merge_sort_is_stable() {
        // Ordered by key only, so equal keys are distinguishable by tag.
        #[derive(Clone, Debug, PartialEq)]
        struct Keyed(i32, char);
        impl PartialOrd for Keyed {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }
        let mut keyed = vec![Keyed(2, 'a'), Keyed(1, 'b'), Keyed(2, 'c'), Keyed(1, 'd')];
        iterative_merge_sort(&mut keyed).unwrap();
        let order: Vec<char> = keyed.iter().map(|k| k.1).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn test_merge_sort_incomparable() {
        let mut seq = vec![1.0, f64::NAN];
        assert!(matches!(
            iterative_merge_sort(&mut seq),
            Err(SortError::Incomparable { .. })
        ));
    }
}
