//! Error type shared by the in-memory and external sorts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sortkit operations.
pub type Result<T> = std::result::Result<T, SortError>;

/// Error type for sortkit operations.
#[derive(Error, Debug)]
pub enum SortError {
    /// Reading or writing a file failed.
    #[error("{}: {}", path.display(), crate::common::io_error_msg(source))]
    Io {
        /// File the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A line of a record file is not an integer.
    #[error("{}:{line}: invalid integer record '{content}'", path.display())]
    MalformedRecord {
        /// File containing the record
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending line, lossily decoded
        content: String,
    },

    /// Two elements have no defined order (e.g. a NaN).
    #[error("elements at indices {left} and {right} are not comparable")]
    Incomparable {
        /// Index of the left operand
        left: usize,
        /// Index of the right operand
        right: usize,
    },

    /// The inclusive upper bound lies outside the sequence.
    #[error("range end {high} is out of bounds for a sequence of length {len}")]
    RangeOutOfBounds {
        /// Requested upper bound
        high: usize,
        /// Sequence length
        len: usize,
    },

    /// Iterative merge sort only handles power-of-two lengths.
    #[error("merge sort requires a power-of-two length, got {len}")]
    NotPowerOfTwo {
        /// Sequence length
        len: usize,
    },

    /// Bucket keys must be non-negative.
    #[error("bucket sort keys must be non-negative, got {value}")]
    NegativeKey {
        /// Offending value
        value: i64,
    },

    /// The sort was configured with unusable parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input holds more records than `chunk_count * chunk_capacity`.
    #[error("input holds more than {capacity} records (chunk count x chunk capacity)")]
    CapacityExceeded {
        /// Total record capacity of the run
        capacity: usize,
    },
}

impl SortError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SortError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_strips_os_suffix() {
        let err = SortError::io("missing.txt", io::Error::from_raw_os_error(libc::ENOENT));
        let msg = format!("{err}");
        assert!(msg.starts_with("missing.txt: "));
        assert!(!msg.contains("os error"), "got: {msg}");
    }

    #[test]
    fn test_malformed_record_message() {
        let err = SortError::MalformedRecord {
            path: PathBuf::from("in.txt"),
            line: 3,
            content: "abc".to_string(),
        };
        assert_eq!(format!("{err}"), "in.txt:3: invalid integer record 'abc'");
    }

    #[test]
    fn test_capacity_exceeded_message() {
        let err = SortError::CapacityExceeded { capacity: 6 };
        assert!(format!("{err}").contains("more than 6 records"));
    }
}
