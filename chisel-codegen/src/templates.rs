//! Template lookup by naming convention.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Placeholder for the entity name in template file names.
pub const NAME_TOKEN: &str = "__Name__";
/// Placeholder for the pluralized entity name in template directory names.
pub const NAMES_TOKEN: &str = "__Names__";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no template found for '{artifact}'")]
    Missing {
        artifact: PathBuf,
        /// Candidate paths that were tried, in lookup order.
        tried: Vec<PathBuf>,
    },

    #[error("failed to read template '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk template store.
///
/// Templates mirror the output tree under a root directory, with the entity
/// name abstracted to `__Name__` (and its plural to `__Names__` in folder
/// segments): the template for `Application/Products/ProductDto.cs` lives at
/// `Application/__Names__/__Name__Dto.cs`. When no folder-pattern template
/// exists, a per-extension fallback (`__Default__.cs`) at the root is tried.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the template for an artifact path, resolved by naming
    /// convention: folder-pattern match first, then the file-extension
    /// fallback.
    pub fn find(&self, artifact: &Path, entity_name: &str) -> Result<String, TemplateError> {
        let mut tried = Vec::new();

        let pattern = self.root.join(pattern_path(artifact, entity_name));
        tried.push(pattern.clone());
        if pattern.is_file() {
            return read(&pattern);
        }

        if let Some(ext) = artifact.extension() {
            let fallback = self
                .root
                .join(format!("__Default__.{}", ext.to_string_lossy()));
            tried.push(fallback.clone());
            if fallback.is_file() {
                return read(&fallback);
            }
        }

        Err(TemplateError::Missing {
            artifact: artifact.to_path_buf(),
            tried,
        })
    }
}

fn read(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|e| TemplateError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Abstract an artifact path into its template-pattern path.
fn pattern_path(artifact: &Path, entity_name: &str) -> PathBuf {
    let plural = chisel_core::pluralize(entity_name);
    let mut out = PathBuf::new();
    let components: Vec<&str> = artifact
        .iter()
        .map(|c| c.to_str().unwrap_or_default())
        .collect();
    for (i, segment) in components.iter().enumerate() {
        let is_file = i + 1 == components.len();
        if is_file {
            out.push(pattern_file_name(segment, entity_name));
        } else {
            // folder segments carry the plural form
            out.push(segment.replace(&plural, NAMES_TOKEN).replace(entity_name, NAME_TOKEN));
        }
    }
    out
}

/// Abstract a file name. Names of the interface shape `I<Name>...` keep
/// their leading `I` so `IProductService.cs` maps to `I__Name__Service.cs`
/// rather than swallowing the prefix into the name token.
fn pattern_file_name(file_name: &str, entity_name: &str) -> String {
    let interface_form = format!("I{}", entity_name);
    if file_name.starts_with(&interface_form)
        && entity_name.starts_with(|c: char| c.is_uppercase())
    {
        return file_name.replacen(&interface_form, &format!("I{}", NAME_TOKEN), 1);
    }
    let plural = chisel_core::pluralize(entity_name);
    file_name
        .replace(&plural, NAMES_TOKEN)
        .replace(entity_name, NAME_TOKEN)
}
