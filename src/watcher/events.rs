//! Per-tick event report.

use std::path::PathBuf;

use super::magic::MagicMatch;
use crate::error::WatcherError;

/// Everything observed during one poll of the watched directory.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Files that started being tracked.
    pub added: Vec<PathBuf>,
    /// Files that stopped being tracked because they left the listing
    /// or the directory became unreadable.
    pub removed: Vec<PathBuf>,
    /// New magic-text matches.
    pub matches: Vec<MagicMatch>,
    /// Lines examined by the magic scan.
    pub lines_scanned: usize,
    /// Tracked files that could not be read and were dropped.
    pub file_errors: Vec<WatcherError>,
    /// Set when the directory itself could not be listed.
    pub directory_error: Option<WatcherError>,
}

impl TickReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the tick observed nothing at all.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.matches.is_empty()
            && self.lines_scanned == 0
            && self.file_errors.is_empty()
            && self.directory_error.is_none()
    }

    /// Check if the directory listing failed.
    #[must_use]
    pub const fn directory_unreadable(&self) -> bool {
        self.directory_error.is_some()
    }
}
