use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for parser operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the source directory in chisel.toml points at the domain project"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source text is not scannable as type declarations")]
    #[diagnostic(code(chisel::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        reason: String,
    },

    #[error("unbalanced '{delimiter}'")]
    #[diagnostic(
        code(chisel::unbalanced_delimiter),
        help("every brace must have a matching partner before declarations can be scanned")
    )]
    UnbalancedDelimiter {
        #[source_code]
        src: NamedSource<String>,
        #[label("unmatched delimiter here")]
        span: SourceSpan,
        delimiter: char,
    },
}

impl Error {
    /// Create an I/O error for a source file path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a generic parse error with source context.
    pub fn parse(
        reason: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            reason: reason.into(),
        })
    }

    /// Create an unbalanced-delimiter error at a byte offset.
    pub fn unbalanced(delimiter: char, offset: usize, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::UnbalancedDelimiter {
            src: NamedSource::new(filename, src.to_string()),
            span: SourceSpan::from(offset..offset + delimiter.len_utf8()),
            delimiter,
        })
    }
}
