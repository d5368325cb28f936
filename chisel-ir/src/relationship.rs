//! Relationship classification for navigation properties.

use serde::Serialize;

/// Relationship details of a navigation property.
///
/// Populated by the attribute interpreter only when the property carries the
/// relationship role. `linking_table` is required exactly for many-to-many
/// relationships; generators skip the fragment with a diagnostic when it is
/// missing, since upstream annotation data may be incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Relationship {
    pub kind: Option<RelationshipKind>,
    /// Navigation property on the other side of the relationship.
    pub inverse_property: Option<String>,
    /// Foreign key property on the dependent side.
    pub foreign_key_property: Option<String>,
    /// Junction entity name; many-to-many only.
    pub linking_table: Option<String>,
    pub on_delete: DeleteBehavior,
}

/// Cardinality of a relationship, seen from the annotated property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::OneToOne => "OneToOne",
            RelationshipKind::OneToMany => "OneToMany",
            RelationshipKind::ManyToOne => "ManyToOne",
            RelationshipKind::ManyToMany => "ManyToMany",
        }
    }
}

/// Referential delete behavior carried by the relationship annotation.
///
/// `None` means the annotation did not specify one; no on-delete clause is
/// emitted in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DeleteBehavior {
    #[default]
    None,
    Cascade,
    Restrict,
    SetNull,
    NoAction,
}

impl DeleteBehavior {
    /// The token used in generated mapping code, or `None` when no clause
    /// should be emitted.
    pub fn as_token(&self) -> Option<&'static str> {
        match self {
            DeleteBehavior::None => None,
            DeleteBehavior::Cascade => Some("Cascade"),
            DeleteBehavior::Restrict => Some("Restrict"),
            DeleteBehavior::SetNull => Some("SetNull"),
            DeleteBehavior::NoAction => Some("NoAction"),
        }
    }
}
