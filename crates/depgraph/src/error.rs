//! Error types for depgraph operations.

use std::io;
use thiserror::Error;

/// The error type for depgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required input was missing or empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A dependency source could not answer for a package.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// A fixture line matched the requested package but could not be parsed.
    #[error("Malformed fixture line {line}: {reason}")]
    MalformedFixture {
        /// 1-based line number in the fixture file.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The package registry could not answer.
    #[error("Registry error: {0}")]
    Registry(#[from] depgraph_nuget::Error),

    /// Writing an output artifact or running the drawing tool failed.
    #[error("Render error: {0}")]
    Render(String),
}

/// A specialized Result type for depgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
