//! Phase 1 of the external sort: fill a bounded buffer, sort it, spill it.

use std::path::{Path, PathBuf};

use log::debug;
use rand::Rng;

use crate::error::Result;
use crate::sort::hybrid_sort;

use super::record::RecordWriter;

/// Records reserved up front for the chunk buffer; it grows on demand
/// toward `chunk_capacity` only as input arrives.
const INITIAL_BUF_RECORDS: usize = 64 * 1024;

/// One sorted run written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpillChunk {
    /// Creation index, `0..chunk_count`
    pub index: usize,
    /// File holding the run
    pub path: PathBuf,
    /// Number of records in the run
    pub len: usize,
}

/// Spill file name for chunk `index`: `<dir>/<prefix><index>.txt`.
pub fn spill_path(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    dir.join(format!("{prefix}{index}.txt"))
}

/// Read `chunk_count` windows of up to `chunk_capacity` records from
/// `source`, sort each with [`hybrid_sort`] and write it to its own spill
/// file.
///
/// Exactly `chunk_count` files are created; once the source runs dry the
/// remaining chunks are empty. At most one buffer of `chunk_capacity`
/// records is resident at a time, sized by the records actually read.
pub fn produce_chunks<I, R>(
    source: &mut I,
    chunk_capacity: usize,
    chunk_count: usize,
    spill_dir: &Path,
    spill_prefix: &str,
    rng: &mut R,
) -> Result<Vec<SpillChunk>>
where
    I: Iterator<Item = Result<i64>>,
    R: Rng + ?Sized,
{
    let mut buf: Vec<i64> = Vec::with_capacity(chunk_capacity.min(INITIAL_BUF_RECORDS));
    let mut chunks = Vec::new();

    for index in 0..chunk_count {
        buf.clear();
        while buf.len() < chunk_capacity {
            match source.next() {
                Some(value) => buf.push(value?),
                None => break,
            }
        }

        let high = buf.len().saturating_sub(1);
        hybrid_sort(&mut buf, 0, high, rng)?;

        let path = spill_path(spill_dir, spill_prefix, index);
        let mut writer = RecordWriter::create(&path)?;
        for &value in &buf {
            writer.write(value)?;
        }
        let len = writer.finish()?;
        debug!("spilled chunk {} ({} records) to {}", index, len, path.display());

        chunks.push(SpillChunk { index, path, len });
    }

    Ok(chunks)
}
