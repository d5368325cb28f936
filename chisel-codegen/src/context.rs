//! The per-run scaffolding context.

use std::path::{Path, PathBuf};

use chisel_core::Diagnostic;
use chisel_ir::ClassModel;
use tracing::info;

use crate::source::read_source_files;

/// The loaded entity list for one scaffolder run.
///
/// Constructed once per run and passed by reference; there is no ambient
/// global cache. [`refresh`] synchronously re-reads the source tree.
///
/// [`refresh`]: ScaffoldContext::refresh
#[derive(Debug)]
pub struct ScaffoldContext {
    source_dir: PathBuf,
    models: Vec<ClassModel>,
    diagnostics: Vec<Diagnostic>,
}

impl ScaffoldContext {
    /// Read and parse every source file under the given directory.
    ///
    /// Per-file parse failures become diagnostics; the context always loads.
    pub fn load(source_dir: impl Into<PathBuf>) -> Self {
        let mut ctx = Self {
            source_dir: source_dir.into(),
            models: Vec::new(),
            diagnostics: Vec::new(),
        };
        ctx.refresh();
        ctx
    }

    /// Reload the entity list from disk.
    pub fn refresh(&mut self) {
        let (files, mut diagnostics) = read_source_files(&self.source_dir);
        let mut models = Vec::new();

        for (path, text) in &files {
            match chisel_parser::parse_str_with_filename(text, &path.display().to_string()) {
                Ok(parsed) => {
                    for model in parsed {
                        if !models.contains(&model) {
                            models.push(model);
                        }
                    }
                }
                Err(e) => {
                    diagnostics.push(
                        Diagnostic::error("parse", e.to_string()).on(path.display().to_string()),
                    );
                }
            }
        }

        info!(
            files = files.len(),
            models = models.len(),
            "loaded entity models"
        );
        self.models = models;
        self.diagnostics = diagnostics;
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// The last-loaded model list, declaration order preserved.
    pub fn models(&self) -> &[ClassModel] {
        &self.models
    }

    /// Diagnostics collected while loading.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Non-enum models: the scaffoldable entities.
    pub fn entities(&self) -> impl Iterator<Item = &ClassModel> {
        self.models.iter().filter(|m| !m.is_enum)
    }

    /// Find an entity by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&ClassModel> {
        self.entities().find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn seed(temp: &TempDir) {
        fs::write(
            temp.path().join("Product.cs"),
            "namespace Shop { public class Product { public int Id { get; set; } } }",
        )
        .unwrap();
        fs::write(temp.path().join("Broken.cs"), "public class Broken {").unwrap();
    }

    #[test]
    fn test_load_collects_models_and_diagnostics() {
        let temp = TempDir::new().unwrap();
        seed(&temp);

        let ctx = ScaffoldContext::load(temp.path());
        assert_eq!(ctx.models().len(), 1);
        assert_eq!(ctx.models()[0].name, "Product");
        // the broken file is a diagnostic, not a failure
        assert_eq!(ctx.diagnostics().len(), 1);
        assert!(ctx.diagnostics()[0].severity.is_error());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        seed(&temp);

        let ctx = ScaffoldContext::load(temp.path());
        assert!(ctx.find("product").is_some());
        assert!(ctx.find("Missing").is_none());
    }

    #[test]
    fn test_refresh_picks_up_new_files() {
        let temp = TempDir::new().unwrap();
        seed(&temp);

        let mut ctx = ScaffoldContext::load(temp.path());
        assert_eq!(ctx.models().len(), 1);

        fs::write(
            temp.path().join("Tag.cs"),
            "namespace Shop { public class Tag { public int Id { get; set; } } }",
        )
        .unwrap();
        ctx.refresh();
        assert_eq!(ctx.models().len(), 2);
    }
}
