//! Cumulative watcher statistics.

use std::time::Duration;

use super::events::TickReport;

/// Counters accumulated over the lifetime of a watcher.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatcherStats {
    /// Completed ticks.
    pub ticks: u64,
    /// Files that started being tracked.
    pub files_added: u64,
    /// Files dropped because they vanished or their directory did.
    pub files_deleted: u64,
    /// Lines reported as containing the magic text.
    pub matches: u64,
    /// Lines examined by the magic scan.
    pub lines_scanned: u64,
    /// Ticks whose directory listing failed.
    pub directory_errors: u64,
    /// Tracked files dropped because they could not be read.
    pub file_errors: u64,
}

impl WatcherStats {
    /// Create zeroed stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick into the totals.
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.files_added += report.added.len() as u64;
        self.files_deleted += report.removed.len() as u64;
        self.matches += report.matches.len() as u64;
        self.lines_scanned += report.lines_scanned as u64;
        self.file_errors += report.file_errors.len() as u64;
        if report.directory_unreadable() {
            self.directory_errors += 1;
        }
    }
}

/// Render a duration as `H:MM:SS.ffffff`.
#[must_use]
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        uptime.subsec_micros()
    )
}
