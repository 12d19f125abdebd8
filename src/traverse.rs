//! Per-file traversal with fault isolation.
//!
//! The traverser owns the only mutable state that crosses file boundaries:
//! the dispatched-tree count and the parse-error list. A failed parse is
//! recorded and the pass continues; no error propagates across a file
//! boundary and no file is retried.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::parser::{ParseError, ParsedSource, RubyParser};

/// Receives each successfully parsed tree, in discovery order. Dispatch is
/// fire-and-forget from the traverser's perspective.
pub trait TreeSink {
    fn dispatch(&mut self, source: &ParsedSource);
}

/// Outcome of one full pass over the discovered files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalReport {
    /// Number of trees handed to the sink.
    pub trees_dispatched: usize,
    /// One `"<path> - <ErrorKind> - <message>"` entry per unparseable file,
    /// in discovery order. Empty when every file parsed, and empty when
    /// there were no files at all.
    pub parse_error_paths: Vec<String>,
}

/// Walks the discovered file list, parsing each file and dispatching the
/// resulting trees to a sink.
pub struct Traverser {
    root: PathBuf,
    parser: RubyParser,
}

impl Traverser {
    pub fn new(root: &Path) -> Result<Self, ParseError> {
        Ok(Self {
            root: root.to_path_buf(),
            parser: RubyParser::new()?,
        })
    }

    /// Parse every file in `files` (paths relative to the root), dispatching
    /// each successful tree immediately. Failures become formatted entries in
    /// the report, with kind name and message taken verbatim from the parser.
    pub fn traverse(&mut self, files: &[String], sink: &mut dyn TreeSink) -> TraversalReport {
        let mut report = TraversalReport::default();

        for rel_path in files {
            match self.parser.parse_file(&self.root, rel_path) {
                Ok(parsed) => {
                    debug!(path = %rel_path, "Dispatching parsed tree");
                    sink.dispatch(&parsed);
                    report.trees_dispatched += 1;
                }
                Err(err) => {
                    warn!(path = %rel_path, error = %err, "Failed to parse file");
                    report
                        .parse_error_paths
                        .push(format!("{} - {} - {}", rel_path, err.kind_name(), err));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSink {
        paths: Vec<String>,
    }

    impl TreeSink for RecordingSink {
        fn dispatch(&mut self, source: &ParsedSource) {
            self.paths.push(source.path.clone());
        }
    }

    #[test]
    fn test_empty_file_list_yields_empty_report() {
        let dir = TempDir::new().unwrap();
        let mut traverser = Traverser::new(dir.path()).unwrap();
        let mut sink = RecordingSink::default();

        let report = traverser.traverse(&[], &mut sink);
        assert_eq!(report, TraversalReport::default());
        assert!(sink.paths.is_empty());
    }

    #[test]
    fn test_valid_files_are_dispatched_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.rb"), "puts 1\n").unwrap();
        fs::write(dir.path().join("b.rb"), "puts 2\n").unwrap();

        let mut traverser = Traverser::new(dir.path()).unwrap();
        let mut sink = RecordingSink::default();
        let files = vec!["a.rb".to_string(), "b.rb".to_string()];

        let report = traverser.traverse(&files, &mut sink);
        assert_eq!(report.trees_dispatched, 2);
        assert!(report.parse_error_paths.is_empty());
        assert_eq!(sink.paths, vec!["a.rb", "b.rb"]);
    }

    #[test]
    fn test_unparseable_file_is_recorded_and_isolated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("user.rb"), "[]*/sa*()").unwrap();
        fs::write(dir.path().join("valid.rb"), "puts 1\n").unwrap();

        let mut traverser = Traverser::new(dir.path()).unwrap();
        let mut sink = RecordingSink::default();
        let files = vec!["user.rb".to_string(), "valid.rb".to_string()];

        let report = traverser.traverse(&files, &mut sink);

        // The bad file must not prevent the valid one from being dispatched.
        assert_eq!(report.trees_dispatched, 1);
        assert_eq!(sink.paths, vec!["valid.rb"]);

        assert_eq!(report.parse_error_paths.len(), 1);
        let entry = &report.parse_error_paths[0];
        assert!(
            entry.starts_with("user.rb - SyntaxError - "),
            "unexpected entry: {}",
            entry
        );
    }

    #[test]
    fn test_parse_error_entry_shape() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.rb"), "def foo\n").unwrap();

        let mut traverser = Traverser::new(dir.path()).unwrap();
        let mut sink = RecordingSink::default();
        let report = traverser.traverse(&["broken.rb".to_string()], &mut sink);

        assert_eq!(report.parse_error_paths.len(), 1);
        let parts: Vec<&str> = report.parse_error_paths[0].splitn(3, " - ").collect();
        assert_eq!(parts[0], "broken.rb");
        assert_eq!(parts[1], "SyntaxError");
        assert!(!parts[2].is_empty());
    }

    #[test]
    fn test_unreadable_file_is_a_read_error_entry() {
        let dir = TempDir::new().unwrap();

        let mut traverser = Traverser::new(dir.path()).unwrap();
        let mut sink = RecordingSink::default();
        let report = traverser.traverse(&["gone.rb".to_string()], &mut sink);

        assert_eq!(report.trees_dispatched, 0);
        assert_eq!(report.parse_error_paths.len(), 1);
        assert!(report.parse_error_paths[0].starts_with("gone.rb - ReadError - "));
    }
}
