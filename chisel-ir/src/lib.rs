//! Entity model types for the chisel scaffolder.
//!
//! This crate provides the structured model that the source parser produces
//! and the fragment generators consume.
//!
//! # Architecture
//!
//! ```text
//! *.cs (C# source) → chisel-parser (scanning) → chisel-ir (entity model) → codegen
//! ```
//!
//! The model types are designed to be:
//! - Target-framework agnostic (no EF/FluentValidation concerns leak in)
//! - Cheap to build and discard (one model list per parsed file)
//! - Self-contained (no external dependencies beyond serde)

mod class;
mod property;
mod relationship;

pub use class::{ClassModel, GLOBAL_NAMESPACE};
pub use property::{Attribute, Container, PropertyModel, Role};
pub use relationship::{DeleteBehavior, Relationship, RelationshipKind};
