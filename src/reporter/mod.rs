//! Report types and output formatting.

pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::analysis::Offense;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

/// Everything a reporter needs to render one run.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Number of files discovery selected for scanning.
    pub files_scanned: usize,
    /// Number of trees handed to the detector pipeline.
    pub trees_dispatched: usize,
    /// Detected offenses, grouped per file in discovery order.
    pub offenses: Vec<Offense>,
    /// Formatted `"<path> - <ErrorKind> - <message>"` entries for files that
    /// failed to parse.
    pub parse_error_paths: Vec<String>,
}

impl ScanReport {
    /// Whether the run found anything worth a non-zero exit status.
    pub fn has_findings(&self) -> bool {
        !self.offenses.is_empty() || !self.parse_error_paths.is_empty()
    }
}

pub trait Reporter {
    fn report(&self, report: &ScanReport) -> String;
}
