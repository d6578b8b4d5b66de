//! Directory polling and magic-text scanning.
//!
//! This module provides:
//! - Non-recursive directory listing with an extension filter
//! - Reconciliation of the tracked file table against each listing
//! - Incremental scanning for magic text that resumes at a stored byte position
//! - The polling loop tying them together

mod diff;
mod events;
mod filter;
mod magic;
mod scanner;
mod state;
mod stats;
#[allow(clippy::module_inception)]
mod watcher;

pub use diff::{added_paths, removed_paths, FileSetDiff};
pub use events::TickReport;
pub use filter::FileFilter;
pub use magic::{scan_file, FileScan, MagicMatch, MagicScanOutcome, MagicScanner};
pub use scanner::scan_directory;
pub use state::{Listing, ScanPosition, TrackedFiles};
pub use stats::{format_uptime, WatcherStats};
pub use watcher::{DirWatcher, WatchPhase, WatcherConfig};
