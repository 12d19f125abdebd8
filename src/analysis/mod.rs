//! Detector pipeline: runs the enabled speedup checks over parsed trees.

pub mod ast;
pub mod checks;

use serde::Serialize;

pub use checks::{builtin_checks, SpeedupCheck};

use crate::config::Config;
use crate::parser::ParsedSource;
use crate::traverse::TreeSink;

/// One detected occurrence of a slow idiom.
#[derive(Debug, Clone, Serialize)]
pub struct Offense {
    /// Id of the check that fired.
    pub check: &'static str,
    /// Advice shown in the report.
    pub explanation: &'static str,
    /// Root-relative path of the offending file.
    pub path: String,
    /// 1-based line of the occurrence.
    pub line: usize,
}

/// Runs every enabled check against each dispatched tree and accumulates
/// the offenses for reporting.
pub struct AnalysisPipeline {
    checks: Vec<Box<dyn SpeedupCheck>>,
    offenses: Vec<Offense>,
}

impl AnalysisPipeline {
    /// Build a pipeline holding the built-in checks the configuration has
    /// not disabled.
    pub fn new(config: &Config) -> Self {
        let checks = builtin_checks()
            .into_iter()
            .filter(|check| config.is_check_enabled(check.id()))
            .collect();
        Self {
            checks,
            offenses: Vec::new(),
        }
    }

    /// Ids of the checks that will run.
    pub fn enabled_check_ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.id()).collect()
    }

    pub fn offenses(&self) -> &[Offense] {
        &self.offenses
    }

    pub fn into_offenses(self) -> Vec<Offense> {
        self.offenses
    }
}

impl TreeSink for AnalysisPipeline {
    fn dispatch(&mut self, source: &ParsedSource) {
        let mut file_offenses: Vec<Offense> = Vec::new();
        for check in &self.checks {
            for line in check.scan(source) {
                file_offenses.push(Offense {
                    check: check.id(),
                    explanation: check.explanation(),
                    path: source.path.clone(),
                    line,
                });
            }
        }
        // Within a file, report in source order.
        file_offenses.sort_by_key(|offense| offense.line);
        self.offenses.extend(file_offenses);
    }
}
