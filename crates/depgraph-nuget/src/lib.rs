//! A small NuGet v3 registry client.
//!
//! Resolves the direct dependencies a package version declares in its
//! `.nuspec` manifest. The client discovers the flat-container base address
//! from the registry's service index, downloads the manifest and reduces each
//! declared version range to its minimum version.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod nuspec;
pub mod version;

pub use client::{DeclaredDependency, NugetClient};
pub use error::{Error, Result};
