//! Human-readable terminal output.

use colored::Colorize;

use crate::analysis::Offense;
use crate::reporter::{Reporter, ScanReport};

pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    fn format_file_group(&self, path: &str, offenses: &[&Offense]) -> String {
        let mut output = String::new();
        for offense in offenses {
            output.push_str(&format!(
                "{}:{} {}\n",
                path.bold(),
                offense.line.to_string().cyan(),
                offense.explanation
            ));
        }
        output
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &ScanReport) -> String {
        let mut output = String::new();

        // Offenses arrive grouped per file already; preserve that order.
        let mut groups: Vec<(&str, Vec<&Offense>)> = Vec::new();
        for offense in &report.offenses {
            match groups.last_mut() {
                Some((path, group)) if *path == offense.path => group.push(offense),
                _ => groups.push((&offense.path, vec![offense])),
            }
        }
        for (path, group) in &groups {
            output.push_str(&self.format_file_group(path, group));
            output.push('\n');
        }

        if !report.parse_error_paths.is_empty() {
            output.push_str(&format!("{}\n", "Unparsable files:".red().bold()));
            for entry in &report.parse_error_paths {
                output.push_str(&format!("  {}\n", entry));
            }
            output.push('\n');
        }

        let summary = match report.offenses.len() {
            0 => "No offenses detected.".green().to_string(),
            1 => "1 offense detected.".yellow().to_string(),
            n => format!("{} offenses detected.", n).yellow().to_string(),
        };
        output.push_str(&format!(
            "{} {} file(s) scanned.\n",
            summary, report.files_scanned
        ));

        output
    }
}
