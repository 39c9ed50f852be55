use std::fs::{self, File};
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

#[cfg(target_os = "linux")]
use std::sync::atomic::{AtomicBool, Ordering};

use memmap2::{Mmap, MmapOptions};

use crate::error::{Result, SortError};

/// Holds file data — either zero-copy mmap or an owned Vec.
/// Dereferences to `&[u8]` for transparent use.
pub enum FileData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Below this size a plain read() beats the mmap setup/teardown cost.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Cleared after the first EPERM so we stop retrying O_NOATIME.
#[cfg(target_os = "linux")]
static NOATIME_SUPPORTED: AtomicBool = AtomicBool::new(true);

/// Open a file with O_NOATIME on Linux to avoid atime inode writes.
#[cfg(target_os = "linux")]
pub(crate) fn open_noatime(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    if NOATIME_SUPPORTED.load(Ordering::Relaxed) {
        match fs::OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NOATIME)
            .open(path)
        {
            Ok(f) => return Ok(f),
            Err(ref e) if e.raw_os_error() == Some(libc::EPERM) => {
                // O_NOATIME requires file ownership or CAP_FOWNER
                NOATIME_SUPPORTED.store(false, Ordering::Relaxed);
            }
            Err(e) => return Err(e),
        }
    }
    File::open(path)
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn open_noatime(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Read a whole file, mmap for large regular files and read() otherwise.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let file = open_noatime(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if len == 0 {
        return Ok(FileData::Owned(Vec::new()));
    }
    if len < MMAP_THRESHOLD || !metadata.file_type().is_file() {
        let mut buf = Vec::with_capacity(len as usize);
        let mut reader = file;
        reader.read_to_end(&mut buf)?;
        return Ok(FileData::Owned(buf));
    }

    // SAFETY: read-only mapping of a file we do not modify.
    match unsafe { MmapOptions::new().map(&file) } {
        Ok(mmap) => {
            #[cfg(target_os = "linux")]
            {
                let _ = mmap.advise(memmap2::Advice::Sequential);
            }
            Ok(FileData::Mmap(mmap))
        }
        Err(_) => {
            let mut buf = Vec::with_capacity(len as usize);
            let mut reader = file;
            reader.read_to_end(&mut buf)?;
            Ok(FileData::Owned(buf))
        }
    }
}

/// Read a file path, or all of stdin for `-`.
pub fn read_input(input: &str) -> Result<FileData> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|e| SortError::io("-", e))?;
        Ok(FileData::Owned(buf))
    } else {
        read_file(Path::new(input)).map_err(|e| SortError::io(input, e))
    }
}

/// Classification of one line of an integer record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine {
    Value(i64),
    Blank,
    Malformed,
}

/// Parse one line (without its `\n`). Surrounding ASCII whitespace,
/// including a trailing `\r`, is ignored.
#[inline]
pub fn parse_record(line: &[u8]) -> ParsedLine {
    let trimmed = line.trim_ascii();
    if trimmed.is_empty() {
        return ParsedLine::Blank;
    }
    match std::str::from_utf8(trimmed).ok().and_then(|s| s.parse::<i64>().ok()) {
        Some(v) => ParsedLine::Value(v),
        None => ParsedLine::Malformed,
    }
}

/// Parse every record in an in-memory buffer. Blank lines are skipped.
pub fn parse_records(data: &[u8], path: &Path) -> Result<Vec<i64>> {
    let mut values = Vec::with_capacity(data.len() / 8 + 1);
    let mut start = 0usize;
    let mut line_no = 0usize;

    let mut push = |line: &[u8], line_no: usize| -> Result<()> {
        match parse_record(line) {
            ParsedLine::Value(v) => values.push(v),
            ParsedLine::Blank => {}
            ParsedLine::Malformed => {
                return Err(SortError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: line_no,
                    content: String::from_utf8_lossy(line.trim_ascii()).into_owned(),
                });
            }
        }
        Ok(())
    };

    for pos in memchr::memchr_iter(b'\n', data) {
        line_no += 1;
        push(&data[start..pos], line_no)?;
        start = pos + 1;
    }
    // Last line without trailing newline
    if start < data.len() {
        line_no += 1;
        push(&data[start..], line_no)?;
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_record_variants() {
        assert_eq!(parse_record(b"42"), ParsedLine::Value(42));
        assert_eq!(parse_record(b"  -7 \r"), ParsedLine::Value(-7));
        assert_eq!(parse_record(b""), ParsedLine::Blank);
        assert_eq!(parse_record(b"\r"), ParsedLine::Blank);
        assert_eq!(parse_record(b"4x2"), ParsedLine::Malformed);
        assert_eq!(parse_record(b"99999999999999999999"), ParsedLine::Malformed);
    }

    #[test]
    fn test_parse_records_no_trailing_newline() {
        let values = parse_records(b"3\n1\n\n2", Path::new("x")).unwrap();
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_records_reports_line() {
        let err = parse_records(b"1\n2\nthree\n", Path::new("in.txt")).unwrap_err();
        match err {
            SortError::MalformedRecord { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_file_small_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::File::create(&path).unwrap().write_all(b"5\n4\n").unwrap();
        assert_eq!(&*read_file(&path).unwrap(), b"5\n4\n");

        let empty = dir.path().join("empty.txt");
        fs::File::create(&empty).unwrap();
        assert!(read_file(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input("/nonexistent/fxsort-input").err().unwrap();
        assert!(matches!(err, SortError::Io { .. }));
    }
}
