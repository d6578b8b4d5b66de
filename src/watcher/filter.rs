//! Extension-based file filtering.

use std::path::Path;

/// Filter matching files by their extension.
///
/// Matching is exact and case-sensitive on the characters after the last
/// `.` of the file name. An empty filter matches every file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileFilter {
    extension: Option<String>,
}

impl FileFilter {
    /// Create a filter for `extension` (given without the leading dot).
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: (!extension.is_empty()).then_some(extension),
        }
    }

    /// A filter that matches every file.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// The extension being matched, if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Check whether `path` passes the filter.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(wanted) = self.extension.as_deref() else {
            return true;
        };

        // `Path::extension` treats dotfiles like `.bashrc` as extensionless.
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == wanted)
    }
}
