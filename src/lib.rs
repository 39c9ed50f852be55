#![allow(clippy::len_without_is_empty, clippy::too_many_arguments)]

//! Classical sorting algorithms over inclusive index ranges, plus a
//! bounded-memory external sort for newline-delimited integer files.

/// mimalloc as the global allocator for the binary and tests.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod error;
pub mod external;
pub mod sort;

pub use error::{Result, SortError};
