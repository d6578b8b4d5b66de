//! Polling directory watcher.
//!
//! Every tick lists the watched directory, reconciles the tracked file
//! table against the listing, and scans tracked files for magic text.
//! Ticks repeat at a fixed interval until cancelled.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::diff::FileSetDiff;
use super::events::TickReport;
use super::filter::FileFilter;
use super::magic::MagicScanner;
use super::scanner::scan_directory;
use super::state::TrackedFiles;
use super::stats::{format_uptime, WatcherStats};
use crate::shutdown::Signal;
use crate::{Config, Result};

/// Directory watcher configuration.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Absolute path of the directory to poll.
    pub dir: PathBuf,
    /// Which files to track.
    pub filter: FileFilter,
    /// Text to look for.
    pub magic: String,
    /// Sleep between ticks.
    pub interval: Duration,
}

impl WatcherConfig {
    /// Build a watcher configuration from validated application config.
    ///
    /// # Errors
    ///
    /// Returns an error if the polling time is not a usable interval or the
    /// watch directory cannot be made absolute.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            dir: config.absolute_dir()?,
            filter: FileFilter::new(config.extension.clone()),
            magic: config.magic.clone(),
            interval: config.polling_interval()?,
        })
    }
}

/// Lifecycle of a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchPhase {
    /// Polling.
    Running,
    /// Cancellation observed, shutdown summary pending.
    Stopping,
    /// Shut down.
    Stopped,
}

/// Polls one directory and tracks its files.
#[derive(Debug)]
pub struct DirWatcher {
    config: WatcherConfig,
    tracked: TrackedFiles,
    scanner: MagicScanner,
    stats: WatcherStats,
    phase: WatchPhase,
    started: Instant,
}

impl DirWatcher {
    /// Create a watcher with an empty tracked file table.
    #[must_use]
    pub fn new(config: WatcherConfig) -> Self {
        let scanner = MagicScanner::new(config.magic.clone());
        Self {
            config,
            tracked: TrackedFiles::new(),
            scanner,
            stats: WatcherStats::new(),
            phase: WatchPhase::Running,
            started: Instant::now(),
        }
    }

    /// Currently tracked files.
    #[must_use]
    pub const fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    /// Totals so far.
    #[must_use]
    pub const fn stats(&self) -> WatcherStats {
        self.stats
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> WatchPhase {
        self.phase
    }

    /// Time since the watcher was created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Run one poll: list, reconcile, scan.
    ///
    /// Never fails. A directory that cannot be listed drops every tracked
    /// file; a file that cannot be read drops only that file.
    pub fn tick(&mut self) -> TickReport {
        let _span = tracing::debug_span!("tick", n = self.stats.ticks + 1).entered();
        let mut report = TickReport::new();

        match scan_directory(&self.config.dir, &self.config.filter) {
            Ok(listing) => {
                let diff = FileSetDiff::between(self.tracked.as_map(), &listing);

                for path in diff.added_sorted() {
                    tracing::info!(path = %path.display(), "File added");
                    self.tracked.track(path.clone());
                    report.added.push(path);
                }

                for path in diff.removed_sorted() {
                    tracing::info!(path = %path.display(), "File deleted");
                    self.tracked.untrack(&path);
                    report.removed.push(path);
                }

                let outcome = self.scanner.scan(&mut self.tracked);
                report.matches = outcome.matches;
                report.lines_scanned = outcome.lines_scanned;
                report.file_errors = outcome.failures;
            }
            Err(e) => {
                for path in self.tracked.clear() {
                    tracing::info!(path = %path.display(), "File deleted");
                    report.removed.push(path);
                }
                tracing::warn!(
                    path = %self.config.dir.display(),
                    error = %e,
                    "Watched directory is not accessible"
                );
                report.directory_error = Some(e);
            }
        }

        self.stats.record(&report);
        tracing::debug!(
            tracked = self.tracked.len(),
            added = report.added.len(),
            removed = report.removed.len(),
            matches = report.matches.len(),
            lines = report.lines_scanned,
            "Tick complete"
        );

        report
    }

    /// Poll until `cancel` fires.
    ///
    /// Cancellation interrupts the sleep between ticks immediately; a tick
    /// in progress always completes. Leaves the watcher in
    /// [`WatchPhase::Stopping`].
    pub async fn run(&mut self, cancel: &CancellationToken) {
        tracing::info!(
            path = %self.config.dir.display(),
            interval_secs = self.config.interval.as_secs_f64(),
            "Watching directory"
        );

        while !cancel.is_cancelled() {
            self.tick();

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.config.interval) => {}
            }
        }

        self.phase = WatchPhase::Stopping;
    }

    /// Log the shutdown summary and mark the watcher stopped.
    ///
    /// Returns the final totals.
    pub fn stop(&mut self, signal: Option<Signal>) -> WatcherStats {
        if let Some(signal) = signal {
            tracing::warn!(signal = %signal, "Received {signal}");
        }

        let uptime = format_uptime(self.uptime());
        tracing::info!(
            uptime = %uptime,
            ticks = self.stats.ticks,
            files_added = self.stats.files_added,
            files_deleted = self.stats.files_deleted,
            matches = self.stats.matches,
            lines_scanned = self.stats.lines_scanned,
            directory_errors = self.stats.directory_errors,
            file_errors = self.stats.file_errors,
            "Stopped dirwatcher, uptime was {uptime}"
        );

        self.phase = WatchPhase::Stopped;
        self.stats
    }
}
