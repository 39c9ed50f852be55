//! Bounded-memory external sort of integer record files.
//!
//! Phase 1 reads the input in windows of `chunk_capacity` records, sorts
//! each with the hybrid quicksort and spills it to its own file. Phase 2
//! merges the `chunk_count` runs with one cursor per run. Resident memory is
//! one window during phase 1 and one value per run during phase 2.
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Result, SortError};
use crate::sort::create_rng;

use super::chunk::produce_chunks;
use super::merge::KWayMerger;
use super::record::{RecordReader, RecordWriter};

/// Default spill file prefix: chunk `i` is written to `temp<i>.txt`.
pub const DEFAULT_SPILL_PREFIX: &str = "temp";

/// Configuration for an external sort run.
#[derive(Debug, Clone)]
pub struct ExternalSortConfig {
    /// Records held in memory at once (`k`)
    pub chunk_capacity: usize,
    /// Number of spill chunks (`m`)
    pub chunk_count: usize,
    /// Directory receiving the spill files
    pub spill_dir: PathBuf,
    /// File name prefix of the spill files
    pub spill_prefix: String,
    /// Seed for pivot selection; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl Default for ExternalSortConfig {
    fn default() -> Self {
        ExternalSortConfig {
            chunk_capacity: 1024 * 1024,
            chunk_count: 16,
            spill_dir: PathBuf::from("."),
            spill_prefix: DEFAULT_SPILL_PREFIX.to_string(),
            seed: None,
        }
    }
}

impl ExternalSortConfig {
    /// Total records the run can hold (`chunk_count * chunk_capacity`).
    pub fn capacity(&self) -> usize {
        self.chunk_count.saturating_mul(self.chunk_capacity)
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_capacity == 0 {
            return Err(SortError::InvalidConfig(
                "chunk capacity must be at least 1".to_string(),
            ));
        }
        if self.chunk_count == 0 {
            return Err(SortError::InvalidConfig(
                "chunk count must be at least 1".to_string(),
            ));
        }
        if self.spill_prefix.contains(std::path::is_separator) {
            return Err(SortError::InvalidConfig(format!(
                "spill prefix '{}' must not contain a path separator",
                self.spill_prefix
            )));
        }
        Ok(())
    }
}

/// Outcome of an external sort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSortStats {
    pub records_read: usize,
    pub records_written: usize,
    /// Spill files left behind; removing them is up to the caller.
    pub spill_paths: Vec<PathBuf>,
}

/// External sorter for newline-delimited integer files.
#[derive(Debug, Clone)]
pub struct ExternalSorter {
    config: ExternalSortConfig,
}

impl ExternalSorter {
    /// Create a sorter holding `chunk_capacity` records in memory and
    /// spilling `chunk_count` chunks.
    #[must_use]
    pub fn new(chunk_capacity: usize, chunk_count: usize) -> Self {
        ExternalSorter {
            config: ExternalSortConfig {
                chunk_capacity,
                chunk_count,
                ..ExternalSortConfig::default()
            },
        }
    }

    /// Build a sorter from a full configuration.
    #[must_use]
    pub fn with_config(config: ExternalSortConfig) -> Self {
        ExternalSorter { config }
    }

    /// Set the directory for spill files.
    #[must_use]
    pub fn spill_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.spill_dir = dir.into();
        self
    }

    /// Set the spill file name prefix.
    #[must_use]
    pub fn spill_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.spill_prefix = prefix.into();
        self
    }

    /// Seed pivot selection for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &ExternalSortConfig {
        &self.config
    }

    /// Sort `input` into `output`.
    ///
    /// Fails with [`SortError::CapacityExceeded`] if `input` holds more than
    /// `chunk_count * chunk_capacity` records. Spill files are not removed.
    pub fn sort_file(&self, input: &Path, output: &Path) -> Result<ExternalSortStats> {
        let config = &self.config;
        config.validate()?;
        let mut rng = create_rng(config.seed);

        let mut source = RecordReader::open(input)?;
        let chunks = produce_chunks(
            &mut source,
            config.chunk_capacity,
            config.chunk_count,
            &config.spill_dir,
            &config.spill_prefix,
            &mut rng,
        )?;
        if source.next_record()?.is_some() {
            return Err(SortError::CapacityExceeded {
                capacity: config.capacity(),
            });
        }
        drop(source);

        let records_read: usize = chunks.iter().map(|c| c.len).sum();
        let budget = config.capacity();

        let mut merger = KWayMerger::open(&chunks, budget)?;
        let mut writer = RecordWriter::create(output)?;
        while let Some(value) = merger.next_value()? {
            writer.write(value)?;
        }
        let records_written = writer.finish()?;

        if records_written < budget {
            debug!(
                "merge exhausted all {} chunks after {} of {} records",
                chunks.len(),
                records_written,
                budget
            );
        }
        info!(
            "sorted {} records from {} into {} via {} chunks",
            records_read,
            input.display(),
            output.display(),
            chunks.len()
        );

        Ok(ExternalSortStats {
            records_read,
            records_written,
            spill_paths: chunks.into_iter().map(|c| c.path).collect(),
        })
    }
}

/// Sort `input` into `output` holding at most `k` records in memory and
/// spilling `m` chunks to the current directory.
pub fn external_sort(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    k: usize,
    m: usize,
) -> Result<ExternalSortStats> {
    ExternalSorter::new(k, m).sort_file(input.as_ref(), output.as_ref())
}

/// Result of checking whether a record file is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Sorted,
    /// First record smaller than its predecessor.
    Disorder { line: usize, value: i64 },
}

/// Stream a record file and report the first out-of-order record.
pub fn check_sorted_file(path: &Path) -> Result<CheckOutcome> {
    let mut reader = RecordReader::open(path)?;
    let mut prev: Option<i64> = None;
    while let Some(value) = reader.next_record()? {
        if prev.is_some_and(|p| value < p) {
            return Ok(CheckOutcome::Disorder {
                line: reader.line_number(),
                value,
            });
        }
        prev = Some(value);
    }
    Ok(CheckOutcome::Sorted)
}
