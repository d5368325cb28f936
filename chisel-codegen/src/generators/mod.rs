//! Fragment generators, one module per artifact kind.
//!
//! Every generator is a pure function of the entity model: no I/O, no
//! shared state. A model with zero properties yields an empty fragment;
//! incomplete relationship metadata yields a skipped fragment plus a
//! diagnostic, never a panic.

mod dto;
mod orm;
mod porting;
mod ui;
mod validation;

pub use dto::dto_fields;
pub use orm::{OrmOutput, relationship_mappings};
pub use porting::{export_mappings, import_mappings};
pub use ui::{form_fields, list_cells, list_headers, search_predicate};
pub use validation::validation_rules;
