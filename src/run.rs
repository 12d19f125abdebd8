//! End-to-end scan pipeline.
//!
//! Wires the core together: resolve config, discover files, traverse, and
//! package the detector output for the reporters. The configuration is
//! resolved once here and is immutable for the rest of the run.

use std::path::Path;

use tracing::debug;

use crate::analysis::AnalysisPipeline;
use crate::config::Config;
use crate::discovery::FileDiscoverer;
use crate::error::{Error, Result};
use crate::reporter::ScanReport;
use crate::traverse::Traverser;

/// Scan the project rooted at `root` and produce a report.
pub fn run_scan(root: &Path) -> Result<ScanReport> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.display().to_string()));
    }

    let config = Config::resolve(root);
    debug!(
        excludes = config.exclude_paths.len(),
        overrides = config.speedups.len(),
        "Resolved configuration"
    );

    let files = FileDiscoverer::new().discover(root, &config.exclude_paths);
    debug!(count = files.len(), "Discovered source files");

    let mut pipeline = AnalysisPipeline::new(&config);
    let mut traverser = Traverser::new(root)?;
    let traversal = traverser.traverse(&files, &mut pipeline);

    Ok(ScanReport {
        files_scanned: files.len(),
        trees_dispatched: traversal.trees_dispatched,
        offenses: pipeline.into_offenses(),
        parse_error_paths: traversal.parse_error_paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_of_missing_root_fails() {
        let err = run_scan(Path::new("/nonexistent/project")).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_scan_of_empty_project() {
        let dir = TempDir::new().unwrap();
        let report = run_scan(dir.path()).unwrap();

        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.trees_dispatched, 0);
        assert!(report.offenses.is_empty());
        assert!(report.parse_error_paths.is_empty());
        assert!(!report.has_findings());
    }

    #[test]
    fn test_scan_reports_offenses() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("slow.rb"), "for x in [1, 2]\n  puts x\nend\n").unwrap();

        let report = run_scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.trees_dispatched, 1);
        assert_eq!(report.offenses.len(), 1);
        assert_eq!(report.offenses[0].path, "slow.rb");
        assert!(report.has_findings());
    }

    #[test]
    fn test_scan_honors_exclude_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "exclude_paths:\n  - 'slow.rb'\n",
        )
        .unwrap();
        fs::write(dir.path().join("slow.rb"), "for x in [1, 2]\n  puts x\nend\n").unwrap();

        let report = run_scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 0);
        assert!(!report.has_findings());
    }

    #[test]
    fn test_scan_honors_disabled_speedups() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "speedups:\n  for_loop_vs_each: false\n",
        )
        .unwrap();
        fs::write(dir.path().join("slow.rb"), "for x in [1, 2]\n  puts x\nend\n").unwrap();

        let report = run_scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 1);
        assert!(report.offenses.is_empty());
    }

    #[test]
    fn test_scan_isolates_parse_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.rb"), "[]*/sa*()").unwrap();
        fs::write(dir.path().join("slow.rb"), "list.shuffle.first\n").unwrap();

        let report = run_scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.trees_dispatched, 1);
        assert_eq!(report.offenses.len(), 1);
        assert_eq!(report.parse_error_paths.len(), 1);
        assert!(report.parse_error_paths[0].starts_with("broken.rb - SyntaxError - "));
    }
}
