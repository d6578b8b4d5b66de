//! Incremental magic-text scanning.
//!
//! Each tracked file is resumed from its stored position: the reader seeks
//! past the bytes already consumed, so old lines are neither re-read nor
//! reported again no matter how many polls follow.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::state::{ScanPosition, TrackedFiles};
use crate::error::WatcherError;

/// A line containing the magic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicMatch {
    /// File the line belongs to.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
}

/// Result of scanning one file past its stored position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileScan {
    /// Matching lines, in file order.
    pub matches: Vec<MagicMatch>,
    /// Number of lines examined.
    pub lines_scanned: usize,
    /// Where the next scan resumes.
    pub position: ScanPosition,
}

/// Aggregate result of scanning every tracked file.
#[derive(Debug, Default)]
pub struct MagicScanOutcome {
    /// Matches across all files.
    pub matches: Vec<MagicMatch>,
    /// Lines examined across all files.
    pub lines_scanned: usize,
    /// Files that could not be read and were dropped from tracking.
    pub failures: Vec<WatcherError>,
}

/// Scan `path` for `magic`, resuming at `from`.
///
/// Lines are split on `\n`. A trailing line without a newline is examined
/// and counted; when it is completed later it is skipped rather than
/// counted again. Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns [`WatcherError::FileAccess`] if the file cannot be opened or read.
pub fn scan_file(path: &Path, from: ScanPosition, magic: &str) -> Result<FileScan, WatcherError> {
    let mut file = File::open(path).map_err(|e| WatcherError::file(path, e))?;
    file.seek(SeekFrom::Start(from.byte))
        .map_err(|e| WatcherError::file(path, e))?;
    let mut reader = BufReader::new(file);

    let mut scan = FileScan {
        position: from,
        ..FileScan::default()
    };
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| WatcherError::file(path, e))?;
        if read == 0 {
            break;
        }
        let terminated = buf.last() == Some(&b'\n');
        let position = &mut scan.position;

        if position.partial {
            // Rest of a line already examined before its newline arrived
            if terminated {
                position.byte += read as u64;
                position.partial = false;
            }
            continue;
        }

        if String::from_utf8_lossy(&buf).contains(magic) {
            scan.matches.push(MagicMatch {
                path: path.to_path_buf(),
                line: position.line + 1,
            });
        }
        position.line += 1;
        scan.lines_scanned += 1;

        if terminated {
            position.byte += read as u64;
        } else {
            position.partial = true;
        }
    }

    Ok(scan)
}

/// Scans tracked files for a fixed magic text.
#[derive(Debug, Clone)]
pub struct MagicScanner {
    magic: String,
}

impl MagicScanner {
    /// Create a scanner looking for `magic`.
    pub fn new(magic: impl Into<String>) -> Self {
        Self {
            magic: magic.into(),
        }
    }

    /// Scan every tracked file and advance its position.
    ///
    /// A file is either fully scanned and advanced, or left untouched and
    /// dropped from `tracked` if it cannot be read. Other files are scanned
    /// regardless.
    pub fn scan(&self, tracked: &mut TrackedFiles) -> MagicScanOutcome {
        let mut outcome = MagicScanOutcome::default();

        for (path, position) in tracked.entries() {
            match scan_file(&path, position, &self.magic) {
                Ok(scan) => {
                    for found in &scan.matches {
                        tracing::info!(
                            path = %found.path.display(),
                            line = found.line,
                            magic = %self.magic,
                            "Magic text found"
                        );
                    }
                    tracked.advance_to(&path, scan.position);
                    outcome.lines_scanned += scan.lines_scanned;
                    outcome.matches.extend(scan.matches);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Tracked file is not readable, dropping it"
                    );
                    tracked.untrack(&path);
                    outcome.failures.push(e);
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn append(path: &Path, text: &str) {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    fn start() -> ScanPosition {
        ScanPosition::default()
    }

    #[test]
    fn test_scan_file_reports_line_numbers() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("m.txt");
        fs::write(&path, "hello\nMAGIC here\nworld\n").unwrap();

        let scan = scan_file(&path, start(), "MAGIC").unwrap();

        assert_eq!(scan.lines_scanned, 3);
        assert_eq!(
            scan.matches,
            vec![MagicMatch {
                path: path.clone(),
                line: 2
            }]
        );
        assert_eq!(scan.position.line, 3);
        assert_eq!(scan.position.byte, 23);
        assert!(!scan.position.partial);
    }

    #[test]
    fn test_scan_file_resumes_from_position() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("m.txt");
        fs::write(&path, "MAGIC\nplain\n").unwrap();

        let first = scan_file(&path, start(), "MAGIC").unwrap();
        assert_eq!(first.matches.len(), 1);

        append(&path, "MAGIC again\n");
        let second = scan_file(&path, first.position, "MAGIC").unwrap();

        assert_eq!(second.lines_scanned, 1);
        assert_eq!(second.matches.len(), 1);
        assert_eq!(second.matches[0].line, 3);
        assert_eq!(second.position.byte, fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_scan_file_seeks_past_consumed_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("m.txt");
        fs::write(&path, "MAGIC\nMAGIC\nMAGIC\n").unwrap();

        // Everything before `byte` counts as consumed, whatever it contains
        let resume = ScanPosition {
            line: 3,
            byte: 18,
            partial: false,
        };
        let idle = scan_file(&path, resume, "MAGIC").unwrap();
        assert!(idle.matches.is_empty());
        assert_eq!(idle.lines_scanned, 0);
        assert_eq!(idle.position, resume);

        append(&path, "tail MAGIC\n");
        let grown = scan_file(&path, resume, "MAGIC").unwrap();
        assert_eq!(grown.lines_scanned, 1);
        assert_eq!(grown.matches[0].line, 4);
        assert_eq!(grown.position.byte, 29);
    }

    #[test]
    fn test_scan_file_one_match_per_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("m.txt");
        fs::write(&path, "MAGIC MAGIC MAGIC\n").unwrap();

        let scan = scan_file(&path, start(), "MAGIC").unwrap();
        assert_eq!(scan.matches.len(), 1);
    }

    #[test]
    fn test_scan_file_counts_unterminated_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("m.txt");
        fs::write(&path, "first\nMAGIC without newline").unwrap();

        let scan = scan_file(&path, start(), "MAGIC").unwrap();

        assert_eq!(scan.lines_scanned, 2);
        assert_eq!(scan.matches[0].line, 2);
        assert_eq!(scan.position.line, 2);
        assert_eq!(scan.position.byte, 6);
        assert!(scan.position.partial);
    }

    #[test]
    fn test_completed_line_is_not_counted_twice() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("m.txt");
        fs::write(&path, "first\nMAGIC part").unwrap();

        let first = scan_file(&path, start(), "MAGIC").unwrap();
        assert_eq!(first.matches.len(), 1);

        let unchanged = scan_file(&path, first.position, "MAGIC").unwrap();
        assert_eq!(unchanged.lines_scanned, 0);
        assert_eq!(unchanged.position, first.position);

        append(&path, "ial\nMAGIC next\n");
        let second = scan_file(&path, first.position, "MAGIC").unwrap();

        assert_eq!(second.lines_scanned, 1);
        assert_eq!(second.matches.len(), 1);
        assert_eq!(second.matches[0].line, 3);
        assert_eq!(second.position.line, 3);
        assert!(!second.position.partial);
        assert_eq!(second.position.byte, fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_scan_file_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let scan = scan_file(&path, start(), "MAGIC").unwrap();
        assert_eq!(scan, FileScan::default());
    }

    #[test]
    fn test_scan_file_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bin.txt");
        fs::write(&path, b"\xff\xfe MAGIC \xc3\n\x80\x80\n").unwrap();

        let scan = scan_file(&path, start(), "MAGIC").unwrap();

        assert_eq!(scan.lines_scanned, 2);
        assert_eq!(scan.matches.len(), 1);
    }

    #[test]
    fn test_scan_file_position_past_end() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("short.txt");
        fs::write(&path, "MAGIC\n").unwrap();

        let beyond = ScanPosition {
            line: 10,
            byte: 100,
            partial: false,
        };
        let scan = scan_file(&path, beyond, "MAGIC").unwrap();
        assert!(scan.matches.is_empty());
        assert_eq!(scan.position, beyond);
    }

    #[test]
    fn test_scan_file_missing() {
        let tmp = TempDir::new().unwrap();
        let err = scan_file(&tmp.path().join("gone.txt"), start(), "MAGIC").unwrap_err();
        assert!(matches!(err, WatcherError::FileAccess { .. }));
    }

    #[test]
    fn test_scanner_advances_positions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.txt");
        fs::write(&path, "a\nMAGIC\n").unwrap();

        let mut tracked = TrackedFiles::new();
        tracked.track(path.clone());
        let scanner = MagicScanner::new("MAGIC");

        let first = scanner.scan(&mut tracked);
        assert_eq!(first.matches.len(), 1);
        assert_eq!(tracked.offset(&path), Some(2));

        let second = scanner.scan(&mut tracked);
        assert!(second.matches.is_empty());
        assert_eq!(second.lines_scanned, 0);
        assert_eq!(tracked.offset(&path), Some(2));

        append(&path, "b\nMAGIC\n");
        let third = scanner.scan(&mut tracked);
        assert_eq!(third.matches.len(), 1);
        assert_eq!(third.matches[0].line, 4);
        assert_eq!(tracked.offset(&path), Some(4));
        assert_eq!(
            tracked.position(&path).unwrap().byte,
            fs::metadata(&path).unwrap().len()
        );
    }

    #[test]
    fn test_scanner_drops_unreadable_file_only() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("good.txt");
        let gone = tmp.path().join("gone.txt");
        fs::write(&good, "MAGIC\n").unwrap();

        let mut tracked = TrackedFiles::new();
        tracked.track(good.clone());
        tracked.track(gone.clone());

        let outcome = MagicScanner::new("MAGIC").scan(&mut tracked);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path(), gone.as_path());
        assert!(!tracked.contains(&gone));
        assert_eq!(tracked.offset(&good), Some(1));
    }
}
