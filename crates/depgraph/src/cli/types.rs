//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::source::WorkingMode;

/// Working mode for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingModeArg {
    /// Read dependencies from a local fixture file
    #[value(alias = "TEST")]
    Test,
    /// Query a NuGet registry
    #[value(alias = "REAL")]
    Real,
}

impl std::fmt::Display for WorkingModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Test => write!(f, "test"),
            Self::Real => write!(f, "real"),
        }
    }
}

impl From<WorkingModeArg> for WorkingMode {
    fn from(arg: WorkingModeArg) -> Self {
        match arg {
            WorkingModeArg::Test => WorkingMode::Test,
            WorkingModeArg::Real => WorkingMode::Real,
        }
    }
}
