//! C# entity declaration parsing for the chisel scaffolder.
//!
//! This crate turns annotated C# source text into the entity model defined
//! in `chisel-ir`. It is not a general C# parser: it recognizes the narrow
//! subset of namespace/class/enum/property/attribute shapes the scaffolding
//! domain needs, and nothing else.
//!
//! ```
//! let models = chisel_parser::parse_str(
//!     "namespace Shop { public class Product { public int Id { get; set; } } }",
//! ).unwrap();
//! assert_eq!(models[0].name, "Product");
//! assert_eq!(models[0].namespace, "Shop");
//! ```

mod error;
mod interpreter;
mod model;
mod scanner;

use std::path::Path;

use chisel_ir::ClassModel;
pub use error::{Error, Result};
pub use interpreter::{enrich_model, enrich_property};
use tracing::debug;

/// Parse source text into enriched class models (uses `<memory>` as the
/// filename for error reporting).
pub fn parse_str(content: &str) -> Result<Vec<ClassModel>> {
    parse_str_with_filename(content, "<memory>")
}

/// Parse source text with a custom filename for error reporting.
///
/// Returns an error only when the text cannot be scanned at all (unbalanced
/// delimiters); text containing no recognizable declaration parses to an
/// empty list.
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Vec<ClassModel>> {
    let chunks = scanner::scan(content)
        .map_err(|e| Error::unbalanced(e.delimiter, e.offset, content, filename))?;
    let mut models = model::build_models(content, chunks);
    for model in &mut models {
        interpreter::enrich_model(model);
    }
    debug!(file = filename, models = models.len(), "parsed source file");
    Ok(models)
}

/// Parse a source file from the given path.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<ClassModel>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename)
}
