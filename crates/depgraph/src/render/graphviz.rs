//! Invocation of the external Graphviz `dot` tool.

use std::path::Path;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Default drawing command; expected on `PATH`.
pub const DEFAULT_GRAPHVIZ_COMMAND: &str = "dot";

/// Image formats the drawing tool is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Scalable Vector Graphics
    Svg,
}

impl ImageFormat {
    /// Infer the format from a file name; anything but `.svg` is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }

    fn flag(self) -> &'static str {
        match self {
            Self::Png => "-Tpng",
            Self::Svg => "-Tsvg",
        }
    }
}

/// Runs the drawing tool on a DOT file.
#[derive(Debug, Clone)]
pub struct Graphviz {
    command: String,
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPHVIZ_COMMAND)
    }
}

impl Graphviz {
    /// Use `command` as the drawing tool.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Rasterize `dot_file` into `image_file`, format taken from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tool cannot be started or exits
    /// unsuccessfully.
    pub async fn render(&self, dot_file: &Path, image_file: &Path) -> Result<()> {
        let format = ImageFormat::from_path(image_file);
        tracing::debug!(
            command = %self.command,
            dot = %dot_file.display(),
            image = %image_file.display(),
            "Running drawing tool"
        );

        let output = Command::new(&self.command)
            .arg(format.flag())
            .arg(dot_file)
            .arg("-o")
            .arg(image_file)
            .output()
            .await
            .map_err(|e| {
                Error::Render(format!(
                    "could not run '{}' ({e}); is Graphviz installed and on PATH?",
                    self.command
                ))
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::Render(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}
