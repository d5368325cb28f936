//! Recursive source-file reading.

use std::path::{Path, PathBuf};

use chisel_core::Diagnostic;
use tracing::warn;
use walkdir::WalkDir;

/// Source file extension the scaffolder consumes.
const SOURCE_EXTENSION: &str = "cs";

/// Read all source files under a directory, recursively.
///
/// Unreadable entries become diagnostics rather than failures; the result
/// is sorted by path so downstream output is deterministic.
pub fn read_source_files(dir: &Path) -> (Vec<(PathBuf, String)>, Vec<Diagnostic>) {
    let mut files = Vec::new();
    let mut diagnostics = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                diagnostics.push(Diagnostic::warning("read", e.to_string()));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION)
        {
            continue;
        }
        match std::fs::read_to_string(path) {
            Ok(text) => files.push((path.to_path_buf(), text)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable source file");
                diagnostics.push(
                    Diagnostic::warning("read", e.to_string()).on(path.display().to_string()),
                );
            }
        }
    }

    (files, diagnostics)
}
