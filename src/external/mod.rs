pub mod chunk;
pub mod core;
pub mod merge;
pub mod record;


pub use self::chunk::{SpillChunk, produce_chunks, spill_path};
pub use self::core::*;
pub use self::merge::{KWayMerger, MergeCursor};
pub use self::record::{RecordReader, RecordWriter};
