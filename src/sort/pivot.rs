//! Randomized median-of-three pivot selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;

use super::ge;

/// Create the generator used for pivot selection, seeded for reproducible
/// runs or from OS entropy when `seed` is `None`.
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Pick a pivot index for `[low, high]` (`high >= low`).
///
/// Three positions are drawn uniformly from the range with replacement and
/// the index holding the median of their values is returned. Repeated draws
/// are fine: the median of `(a, a, b)` is still one of the drawn indices.
pub fn median_of_three<T, R>(seq: &[T], low: usize, high: usize, rng: &mut R) -> Result<usize>
where
    T: PartialOrd,
    R: Rng + ?Sized,
{
    let a = rng.gen_range(low..=high);
    let b = rng.gen_range(low..=high);
    let c = rng.gen_range(low..=high);
    median_index(seq, a, b, c)
}

/// Index of the median value among `seq[a]`, `seq[b]`, `seq[c]`.
pub(crate) fn median_index<T: PartialOrd>(seq: &[T], a: usize, b: usize, c: usize) -> Result<usize> {
    let median = if ge(seq, a, b)? {
        if ge(seq, a, c)? {
            if ge(seq, b, c)? { b } else { c }
        } else {
            a
        }
    } else if ge(seq, b, c)? {
        if ge(seq, a, c)? { a } else { c }
    } else {
        b
    };
    Ok(median)
}
