use std::path::{Path, PathBuf};

use eyre::Result;

/// A generated output file.
///
/// The content is fully assembled in memory before anything touches disk, so
/// a failed generation run never leaves a half-written file behind.
pub struct OutputFile {
    path: PathBuf,
    content: String,
}

impl OutputFile {
    /// Create an output file with the given path and fully-rendered content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the rendered content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file, creating parent directories as needed.
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, &self.content)?;
        Ok(())
    }
}
