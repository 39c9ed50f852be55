//! Phase 2 of the external sort: k-way merge of the spilled runs.

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::Result;

use super::chunk::SpillChunk;
use super::record::RecordReader;

/// Read position in one sorted run.
///
/// `head` is the next unconsumed value; `None` marks the run exhausted,
/// which ranks above every live value so the cursor never wins again.
pub struct MergeCursor<R> {
    reader: RecordReader<R>,
    head: Option<i64>,
}

impl<R: BufRead> MergeCursor<R> {
    /// Open a cursor and prime it with the run's first value.
    pub fn new(mut reader: RecordReader<R>) -> Result<Self> {
        let head = reader.next_record()?;
        Ok(MergeCursor { reader, head })
    }

    pub fn head(&self) -> Option<i64> {
        self.head
    }

    pub fn is_exhausted(&self) -> bool {
        self.head.is_none()
    }

    fn advance(&mut self) -> Result<()> {
        self.head = self.reader.next_record()?;
        Ok(())
    }
}

/// Repeatedly emits the smallest head across all cursors.
///
/// Stops after `budget` values or once every cursor is exhausted, whichever
/// comes first. Ties go to the cursor of the earliest-created run. Memory is
/// one head value (plus a read buffer) per run.
pub struct KWayMerger<R> {
    cursors: Vec<MergeCursor<R>>,
    budget: usize,
    emitted: usize,
}

impl KWayMerger<BufReader<File>> {
    /// Open every spill chunk, in creation order.
    pub fn open(chunks: &[SpillChunk], budget: usize) -> Result<Self> {
        let readers = chunks
            .iter()
            .map(|chunk| RecordReader::open(&chunk.path))
            .collect::<Result<Vec<_>>>()?;
        KWayMerger::new(readers, budget)
    }
}

impl<R: BufRead> KWayMerger<R> {
    pub fn new(readers: Vec<RecordReader<R>>, budget: usize) -> Result<Self> {
        let cursors = readers
            .into_iter()
            .map(MergeCursor::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(KWayMerger {
            cursors,
            budget,
            emitted: 0,
        })
    }

    pub fn cursors(&self) -> &[MergeCursor<R>] {
        &self.cursors
    }

    /// Values emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// True once every cursor has run dry.
    pub fn is_exhausted(&self) -> bool {
        self.cursors.iter().all(MergeCursor::is_exhausted)
    }

    /// Index of the live cursor holding the smallest head.
    fn min_cursor(&self) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (i, cursor) in self.cursors.iter().enumerate() {
            if let Some(v) = cursor.head {
                match best {
                    Some((_, min)) if v >= min => {}
                    _ => best = Some((i, v)),
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Next merged value, or `None` when the merge is finished.
    pub fn next_value(&mut self) -> Result<Option<i64>> {
        if self.emitted >= self.budget {
            return Ok(None);
        }
        let Some(i) = self.min_cursor() else {
            return Ok(None);
        };

        let cursor = &mut self.cursors[i];
        let value = cursor.head;
        cursor.advance()?;
        self.emitted += 1;
        Ok(value)
    }
}

impl<R: BufRead> Iterator for KWayMerger<R> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().transpose()
    }
}
