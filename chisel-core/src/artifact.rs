//! Rendered artifacts and their write rules.

use std::path::{Path, PathBuf};

use eyre::Result;

/// How to handle an existing file at the artifact's target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Only write if the target does not exist yet. This is the default:
    /// scaffolded files are starting points the developer edits, so they are
    /// never overwritten silently.
    #[default]
    IfMissing,
    /// Always overwrite (force-regeneration).
    Always,
}

/// Result of a write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written,
    /// File was skipped because the target already exists.
    Skipped,
}

/// One rendered output file, addressed relative to an output root.
#[derive(Debug, Clone)]
pub struct Artifact {
    relative_path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl Artifact {
    /// Create an artifact with the default write-if-missing rule.
    pub fn new(relative_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
            overwrite: Overwrite::default(),
        }
    }

    /// Override the write rule.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// The target path relative to the output root.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// The rendered content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the artifact under the given root according to its rule.
    /// Parent directories are created as needed.
    pub fn write(&self, root: &Path) -> Result<WriteResult> {
        let path = root.join(&self.relative_path);
        match self.overwrite {
            Overwrite::Always => {
                write_file(&path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if path.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
