//! Newline-delimited integer records: streaming reader and buffered writer.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::common::io::{ParsedLine, open_noatime, parse_record};
use crate::error::{Result, SortError};

/// Read buffer for input and spill files.
const READ_BUF_SIZE: usize = 64 * 1024;

/// Write buffer for spill and output files.
const WRITE_BUF_SIZE: usize = 256 * 1024;

/// Streams integer records one line at a time, skipping blank lines.
pub struct RecordReader<R> {
    reader: R,
    path: PathBuf,
    line: usize,
    buf: Vec<u8>,
}

impl RecordReader<BufReader<File>> {
    /// Open a record file for sequential reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = open_noatime(path).map_err(|e| SortError::io(path, e))?;
        Ok(RecordReader::new(
            BufReader::with_capacity(READ_BUF_SIZE, file),
            path,
        ))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Wrap an already-open reader; `path` is only used in error messages.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        RecordReader {
            reader,
            path: path.into(),
            line: 0,
            buf: Vec::with_capacity(32),
        }
    }

    /// 1-based number of the last line read.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Next record, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<i64>> {
        loop {
            self.buf.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| SortError::io(&self.path, e))?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;

            match parse_record(&self.buf) {
                ParsedLine::Value(v) => return Ok(Some(v)),
                ParsedLine::Blank => continue,
                ParsedLine::Malformed => {
                    return Err(SortError::MalformedRecord {
                        path: self.path.clone(),
                        line: self.line,
                        content: String::from_utf8_lossy(self.buf.trim_ascii()).into_owned(),
                    });
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Writes one integer per line through a large buffer.
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    path: PathBuf,
    itoa: itoa::Buffer,
    written: usize,
}

impl RecordWriter<File> {
    /// Create (or truncate) a record file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| SortError::io(path, e))?;
        Ok(RecordWriter::new(file, path))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        RecordWriter {
            writer: BufWriter::with_capacity(WRITE_BUF_SIZE, inner),
            path: path.into(),
            itoa: itoa::Buffer::new(),
            written: 0,
        }
    }

    #[inline]
    pub fn write(&mut self, value: i64) -> Result<()> {
        let digits = self.itoa.format(value);
        self.writer
            .write_all(digits.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| SortError::io(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .map_err(|e| SortError::io(&self.path, e))?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_skips_blank_lines() {
        let reader = RecordReader::new(Cursor::new(&b"3\n\n-1\r\n 7 \n"[..]), "mem");
        let values: Vec<i64> = reader.map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![3, -1, 7]);
    }

    #[test]
    fn test_reader_malformed_line_number() {
        let mut reader = RecordReader::new(Cursor::new(&b"1\n\nfoo\n"[..]), "mem");
        assert_eq!(reader.next_record().unwrap(), Some(1));
        match reader.next_record() {
            Err(SortError::MalformedRecord { line, content, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "foo");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_writer_counts_and_formats() {
        let mut out = Vec::new();
        let mut writer = RecordWriter::new(&mut out, "mem");
        for v in [-5, 0, 42] {
            writer.write(v).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), 3);
        assert_eq!(out, b"-5\n0\n42\n");
    }
}
