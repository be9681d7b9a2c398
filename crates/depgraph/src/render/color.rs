//! Color and styling helpers for terminal output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (written artifacts)
//!   - Warning:   yellow  (repeat markers, cycle reports)
//!   - Error:     red     (render failures)
//!   - Reference: cyan    (package names, root tree node)
//!   - Muted:     dimmed  (versions, connectors)
//!   - Emphasis:  bold    (section headers)

use colored::Colorize;

use super::OutputConfig;
use crate::domain::PackageId;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Render a package as `name (version)` with the name in cyan and the
/// version dimmed.
pub(crate) fn colorize_package(id: &PackageId, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    format!(
        "{} {}",
        id.name.cyan(),
        format!("({})", id.version).dimmed()
    )
}

/// Apply dimmed style to text (for connectors).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
