//! Recursive source file discovery under a project root.

use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use super::matcher::{GlobMatcher, PathMatcher};

/// Extension identifying Ruby source files.
pub const SOURCE_EXTENSION: &str = "rb";

/// Walks a project root and yields the root-relative paths of every Ruby
/// file not removed by an exclusion pattern.
pub struct FileDiscoverer<M: PathMatcher = GlobMatcher> {
    matcher: M,
}

impl FileDiscoverer {
    pub fn new() -> Self {
        Self {
            matcher: GlobMatcher,
        }
    }
}

impl Default for FileDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: PathMatcher> FileDiscoverer<M> {
    /// Use a custom matching engine instead of the default glob matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Enumerate every `.rb` file under `root`, at any depth, skipping those
    /// whose root-relative path matches any pattern in `exclude_paths`.
    ///
    /// Paths are returned relative to `root` with forward-slash separators
    /// and sorted lexicographically, so the result is deterministic for a
    /// fixed filesystem state. Unreadable entries are skipped with a warning
    /// rather than silently dropped.
    pub fn discover(&self, root: &Path, exclude_paths: &[String]) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable entry during discovery");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == SOURCE_EXTENSION)
            })
            .filter_map(|entry| relative_slash_path(entry.path(), root))
            .filter(|rel| !self.is_excluded(rel, exclude_paths))
            .collect();

        files.sort();
        files
    }

    fn is_excluded(&self, rel_path: &str, exclude_paths: &[String]) -> bool {
        exclude_paths
            .iter()
            .any(|pattern| self.matcher.matches(rel_path, pattern))
    }
}

/// Path of `path` relative to `root`, joined with forward slashes regardless
/// of the host separator.
fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}
