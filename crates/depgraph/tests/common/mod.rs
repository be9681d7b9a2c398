//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Fixture describing the sample repository used across tests.
///
/// App -> Lib -> Util, plus a Plugin that points back at App.
pub const SAMPLE_FIXTURE: &str = "\
# Sample repository
App -> Lib:2.0, Plugin:0.5
Lib -> Util:1.0   # utilities
Util ->
Plugin -> App:1.0
";

/// Write `content` as a fixture file inside `dir`.
pub fn write_fixture(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("repository.txt");
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Run the depgraph binary in `dir` with colors disabled.
pub fn run_depgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_depgraph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute depgraph binary")
}
