//! Discovery layer for scan target enumeration.
//!
//! This module handles:
//! - Recursive directory traversal under the scan root
//! - Source file filtering by extension
//! - Exclusion glob matching against root-relative paths

pub mod matcher;
pub mod walker;

pub use matcher::{GlobMatcher, PathMatcher};
pub use walker::{FileDiscoverer, SOURCE_EXTENSION};
