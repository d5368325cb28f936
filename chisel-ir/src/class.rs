//! Parsed class and enum declarations.

use serde::Serialize;

use crate::PropertyModel;

/// Namespace label used for declarations outside any namespace scope.
pub const GLOBAL_NAMESPACE: &str = "Global";

/// One parsed class or enum declaration.
///
/// Built fresh per parsed file, immutable once the attribute interpreter has
/// run, and discarded after the generators consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    /// Declared type name.
    pub name: String,
    /// Fully qualified enclosing namespace, or [`GLOBAL_NAMESPACE`] when the
    /// declaration sits outside any namespace scope.
    pub namespace: String,
    /// First listed base type, if any. Further base-list entries (interface
    /// implementations) are ignored.
    pub base_type: Option<String>,
    /// True for enum declarations; their members are carried as properties.
    pub is_enum: bool,
    /// Doc-comment summary attached to the declaration.
    pub summary: Option<String>,
    /// Members in declaration order. Generated field ordering depends on it.
    pub properties: Vec<PropertyModel>,
}

impl ClassModel {
    /// Create an empty class model in the given namespace.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            base_type: None,
            is_enum: false,
            summary: None,
            properties: Vec::new(),
        }
    }

    /// The identifier-role property, if one was classified.
    pub fn identifier(&self) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.role == crate::Role::Identifier)
    }

    /// Properties classified as relationships.
    pub fn relationships(&self) -> impl Iterator<Item = &PropertyModel> {
        self.properties
            .iter()
            .filter(|p| p.role == crate::Role::Relationship)
    }

    /// Properties classified as searchable.
    pub fn searchable(&self) -> impl Iterator<Item = &PropertyModel> {
        self.properties
            .iter()
            .filter(|p| p.role == crate::Role::Searchable)
    }
}
