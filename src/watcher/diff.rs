//! Set differences between two directory listings.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Paths present in `new` but not in `old`.
#[must_use]
pub fn added_paths<V, W>(old: &HashMap<PathBuf, V>, new: &HashMap<PathBuf, W>) -> HashSet<PathBuf> {
    new.keys()
        .filter(|path| !old.contains_key(*path))
        .cloned()
        .collect()
}

/// Paths present in `old` but not in `new`.
#[must_use]
pub fn removed_paths<V, W>(
    old: &HashMap<PathBuf, V>,
    new: &HashMap<PathBuf, W>,
) -> HashSet<PathBuf> {
    added_paths(new, old)
}

/// Added and removed paths between two listings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileSetDiff {
    /// Paths that appeared.
    pub added: HashSet<PathBuf>,
    /// Paths that disappeared.
    pub removed: HashSet<PathBuf>,
}

impl FileSetDiff {
    /// Compute the difference going from `old` to `new`.
    #[must_use]
    pub fn between<V, W>(old: &HashMap<PathBuf, V>, new: &HashMap<PathBuf, W>) -> Self {
        Self {
            added: added_paths(old, new),
            removed: removed_paths(old, new),
        }
    }

    /// Check if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Added paths in sorted order, for stable logging.
    #[must_use]
    pub fn added_sorted(&self) -> Vec<PathBuf> {
        sorted(&self.added)
    }

    /// Removed paths in sorted order, for stable logging.
    #[must_use]
    pub fn removed_sorted(&self) -> Vec<PathBuf> {
        sorted(&self.removed)
    }
}

fn sorted(paths: &HashSet<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = paths.iter().cloned().collect();
    paths.sort();
    paths
}
