//! Error types for rbspeed.

use crate::parser::ParseError;
use thiserror::Error;

/// Fatal errors that abort a scan before traversal starts.
///
/// Per-file parse failures are deliberately not represented here; the
/// traverser collects them and surfaces them in the report instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to initialize the Ruby parser: {0}")]
    Parser(#[from] ParseError),
}

/// Result type alias for scan-level operations.
pub type Result<T> = std::result::Result<T, Error>;
