//! Directory scanner.
//!
//! Lists the direct children of the watched directory and keeps the ones
//! that pass the extension filter.

use std::path::Path;

use walkdir::WalkDir;

use super::filter::FileFilter;
use super::state::Listing;
use crate::error::WatcherError;

/// Scan `dir` (non-recursively) for files passing `filter`.
///
/// Every qualifying path is paired with offset `0`; the watch loop keeps the
/// offsets it already holds for known paths. Subdirectories are skipped.
///
/// # Errors
///
/// Returns [`WatcherError::DirectoryAccess`] if `dir` does not exist, is not
/// a directory, or cannot be listed. A partial listing is never returned.
pub fn scan_directory(dir: &Path, filter: &FileFilter) -> Result<Listing, WatcherError> {
    let metadata = std::fs::metadata(dir).map_err(|e| WatcherError::directory(dir, e))?;
    if !metadata.is_dir() {
        return Err(WatcherError::directory(dir, "not a directory"));
    }

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1);

    let mut listing = Listing::new();
    for entry in walker {
        let entry = entry.map_err(|e| WatcherError::directory(dir, e))?;
        let entry_path = entry.path();

        // Follows symlinks so a link to a directory is skipped as well
        if entry_path.is_dir() {
            continue;
        }

        if filter.matches(entry_path) {
            listing.insert(entry_path.to_path_buf(), 0);
        }
    }

    tracing::trace!(path = %dir.display(), files = listing.len(), "Directory listed");

    Ok(listing)
}
