//! Glob matching against root-relative paths.

use tracing::debug;

/// Single-capability matching seam between the walker and the glob engine,
/// so the engine can be swapped or unit-tested without touching traversal.
pub trait PathMatcher {
    /// Whether `path` (root-relative, forward slashes) matches `pattern`.
    fn matches(&self, path: &str, pattern: &str) -> bool;
}

/// Shell-glob matcher backed by `glob::Pattern`.
///
/// Patterns match against the whole relative path, never just the basename:
/// `something.rb` does not match `nested/something.rb`, while `nested/*`
/// does. `*` does not cross `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl PathMatcher for GlobMatcher {
    fn matches(&self, path: &str, pattern: &str) -> bool {
        match glob::Pattern::new(pattern) {
            Ok(pattern) => pattern.matches(path),
            Err(err) => {
                debug!(pattern, error = %err, "Ignoring invalid exclude pattern");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_path_matches_itself() {
        let matcher = GlobMatcher;
        assert!(matcher.matches("nested/something.rb", "nested/something.rb"));
        assert!(matcher.matches("something.rb", "something.rb"));
    }

    #[test]
    fn test_bare_filename_does_not_match_nested_path() {
        let matcher = GlobMatcher;
        assert!(!matcher.matches("nested/something.rb", "something.rb"));
    }

    #[test]
    fn test_star_matches_within_a_directory() {
        let matcher = GlobMatcher;
        assert!(matcher.matches("nested/something.rb", "nested/*"));
        assert!(matcher.matches("nested/other.rb", "nested/*"));
        assert!(!matcher.matches("something.rb", "nested/*"));
    }

    #[test]
    fn test_star_does_not_cross_separators() {
        let matcher = GlobMatcher;
        assert!(!matcher.matches("nested/deep/something.rb", "nested/*"));
        assert!(matcher.matches("nested/deep/something.rb", "nested/*/*"));
    }

    #[test]
    fn test_star_within_a_segment() {
        let matcher = GlobMatcher;
        assert!(matcher.matches("spec/support/analyzer/foo.rb", "spec/support/analyzer/*.rb"));
        assert!(!matcher.matches("spec/support/foo.rb", "spec/support/analyzer/*.rb"));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let matcher = GlobMatcher;
        assert!(!matcher.matches("anything.rb", "a[b.rb"));
    }
}
