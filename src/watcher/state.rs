//! In-memory table of tracked files and their scan positions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mapping from file path to a line offset, as produced by a directory listing.
pub type Listing = HashMap<PathBuf, usize>;

/// Where the next scan of a file resumes.
///
/// `line` counts the lines already examined. `byte` is the file position
/// right after the last newline consumed, so a resumed scan seeks instead
/// of re-reading the file. `partial` marks that the line starting at `byte`
/// was examined while it had no newline yet; it is skipped, not counted,
/// once it is completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanPosition {
    pub(crate) line: usize,
    pub(crate) byte: u64,
    pub(crate) partial: bool,
}

impl ScanPosition {
    /// Number of lines already examined.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// Tracked files keyed by absolute path.
///
/// Each value records where the next scan resumes. Positions only move forward
/// while a path stays tracked; untracking and re-tracking a path starts it
/// over at line 0.
#[derive(Debug, Clone, Default)]
pub struct TrackedFiles {
    positions: HashMap<PathBuf, ScanPosition>,
}

impl TrackedFiles {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `path` at line 0. An already tracked path keeps its position.
    pub fn track(&mut self, path: PathBuf) {
        self.positions.entry(path).or_default();
    }

    /// Stop tracking `path`.
    pub fn untrack(&mut self, path: &Path) {
        self.positions.remove(path);
    }

    /// Move `path` forward to `position`. Positions behind the current one are ignored.
    pub fn advance_to(&mut self, path: &Path, position: ScanPosition) {
        if let Some(current) = self.positions.get_mut(path) {
            if position.line >= current.line {
                *current = position;
            }
        }
    }

    /// Stop tracking every file, returning the dropped paths sorted.
    pub fn clear(&mut self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.positions.drain().map(|(path, _)| path).collect();
        paths.sort();
        paths
    }

    /// Line offset of `path`, if tracked.
    #[must_use]
    pub fn offset(&self, path: &Path) -> Option<usize> {
        self.positions.get(path).map(ScanPosition::line)
    }

    /// Full scan position of `path`, if tracked.
    #[must_use]
    pub fn position(&self, path: &Path) -> Option<ScanPosition> {
        self.positions.get(path).copied()
    }

    /// Check whether `path` is tracked.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.positions.contains_key(path)
    }

    /// Tracked paths with their positions, sorted by path.
    #[must_use]
    pub fn entries(&self) -> Vec<(PathBuf, ScanPosition)> {
        let mut entries: Vec<(PathBuf, ScanPosition)> = self
            .positions
            .iter()
            .map(|(path, position)| (path.clone(), *position))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// The underlying path to position mapping.
    #[must_use]
    pub const fn as_map(&self) -> &HashMap<PathBuf, ScanPosition> {
        &self.positions
    }

    /// Number of tracked files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check whether no file is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
