//! Bucket sort for records keyed by a non-negative integer.

use crate::error::Result;

use super::range_len;

/// A record with an integer sort key and an opaque payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elem<D> {
    pub key: u64,
    pub data: D,
}

impl<D> Elem<D> {
    pub fn new(key: u64, data: D) -> Self {
        Elem { key, data }
    }
}

/// Sort `records[low..=high]` by key, ascending or (when `reversed`)
/// descending.
///
/// The range is split into `length / 2` equal-width buckets over
/// `0..=max_key`; the last bucket takes every key at or above its lower
/// bound. Each bucket is ordered by key, keeping equal keys in input order,
/// and the buckets are concatenated.
pub fn bucket_sort<D>(records: &mut [Elem<D>], low: usize, high: usize, reversed: bool) -> Result<()> {
    let Some(len) = range_len(records.len(), low, high)? else {
        return Ok(());
    };
    let range = &mut records[low..=high];

    let max_key = range.iter().map(|e| e.key).max().unwrap_or(0);
    let n_buckets = len / 2;
    let width = (max_key / n_buckets as u64).max(1);

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); n_buckets];
    for (i, e) in range.iter().enumerate() {
        let b = ((e.key / width) as usize).min(n_buckets - 1);
        buckets[b].push(i);
    }

    for bucket in &mut buckets {
        if reversed {
            bucket.sort_by(|&a, &b| range[b].key.cmp(&range[a].key));
        } else {
            bucket.sort_by_key(|&i| range[i].key);
        }
    }

    let order: Vec<usize> = if reversed {
        buckets.into_iter().rev().flatten().collect()
    } else {
        buckets.into_iter().flatten().collect()
    };

    // dest[src] = final position of the record now at src
    let mut dest = vec![0usize; len];
    for (pos, &src) in order.iter().enumerate() {
        dest[src] = pos;
    }
    for i in 0..len {
        while dest[i] != i {
            let j = dest[i];
            range.swap(i, j);
            dest.swap(i, j);
        }
    }
    Ok(())
}
