//! Fragment generation and the scaffolding pipeline.
//!
//! This crate consumes the entity model built by `chisel-parser` and
//! produces named code fragments (DTO fields, validation rules, ORM
//! mapping statements, import/export mappings, UI markup), then renders
//! them into templates and writes the resulting artifacts.
//!
//! The pipeline per entity is synchronous and linear:
//!
//! ```text
//! parse → enrich → generate fragments → render templates → write files
//! ```
//!
//! Failures local to one file, entity, or artifact become diagnostics and
//! never abort the rest of a batch.

mod context;
mod effect;
mod fragments;
pub mod generators;
mod render;
mod scaffold;
mod source;
mod templates;

pub use context::ScaffoldContext;
pub use effect::SideEffect;
pub use fragments::{Fragments, entity_fragments};
pub use render::render;
pub use scaffold::{ArtifactKind, OutputLayout, PreviewFile, ScaffoldPlan, ScaffoldResult, Scaffolder};
pub use source::read_source_files;
pub use templates::{TemplateError, TemplateStore};
