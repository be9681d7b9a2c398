//! Error types for registry operations.

use thiserror::Error;

/// The error type for registry operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to the registry.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The registry answered with an unexpected status code.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// The service index does not advertise a package base address.
    #[error("Service index has no PackageBaseAddress/3.0.0 resource")]
    MissingBaseAddress,

    /// The `.nuspec` manifest could not be parsed.
    #[error("Invalid nuspec: {0}")]
    Nuspec(String),
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
