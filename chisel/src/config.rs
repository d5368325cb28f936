//! `chisel.toml` configuration.

use std::path::{Path, PathBuf};

use chisel_codegen::OutputLayout;
use eyre::{Context, Result};
use serde::Deserialize;

/// Root configuration for one scaffolded application tree.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Paths of the application tree, all relative to the working directory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory scanned (recursively) for annotated entity classes.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Template tree root.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Root under which the conventional layer projects live.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Per-layer overrides of the conventional layout.
    pub application_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub api_dir: Option<PathBuf>,
    pub ui_dir: Option<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            template_dir: default_template_dir(),
            output_root: default_output_root(),
            application_dir: None,
            data_dir: None,
            api_dir: None,
            ui_dir: None,
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("Domain/Entities")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse '{}'", path.display()))
    }

    /// Resolve the output layout: conventional layer folders under the
    /// output root, unless overridden per layer.
    pub fn layout(&self) -> OutputLayout {
        let mut layout = OutputLayout::under(&self.project.output_root);
        if let Some(dir) = &self.project.application_dir {
            layout.application = dir.clone();
        }
        if let Some(dir) = &self.project.data_dir {
            layout.data = dir.clone();
        }
        if let Some(dir) = &self.project.api_dir {
            layout.api = dir.clone();
        }
        if let Some(dir) = &self.project.ui_dir {
            layout.ui = dir.clone();
        }
        layout
    }
}
