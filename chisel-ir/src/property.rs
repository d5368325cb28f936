//! Property members and their classifications.

use serde::Serialize;

use crate::Relationship;

/// One property (or enum member) of a parsed declaration.
///
/// Created during class parsing, mutated once by the attribute interpreter
/// (role and relationship fields), read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyModel {
    /// Member name as declared.
    pub name: String,
    /// Raw declared type text, e.g. `"string"`, `"int?"`, `"List<Order>"`.
    pub type_name: String,
    /// True when the declared type carries a trailing nullable marker.
    pub nullable: bool,
    /// Container classification of the declared type.
    pub container: Container,
    /// True when the element type is on the known-scalar allow-list;
    /// false means a domain/complex type that gets navigation treatment.
    pub is_known_scalar: bool,
    /// Doc-comment summary attached to the member.
    pub summary: Option<String>,
    /// Human-readable name from a display annotation, or the property name
    /// split at case boundaries.
    pub display_name: String,
    /// Description annotation payload.
    pub description: Option<String>,
    /// Annotated purpose of the property.
    pub role: Role,
    /// Relationship details; populated only when `role == Role::Relationship`.
    pub relationship: Option<Relationship>,
    /// Raw annotations as parsed from the source, in source order.
    pub attributes: Vec<Attribute>,
}

impl PropertyModel {
    /// Create a property with no classification yet.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            type_name: type_name.into(),
            nullable: false,
            container: Container::None,
            is_known_scalar: false,
            summary: None,
            description: None,
            role: Role::None,
            relationship: None,
            attributes: Vec::new(),
        }
    }

    /// The element type of the declared type: the array element, the last
    /// generic argument, or the type itself, without a nullable marker.
    pub fn element_type(&self) -> &str {
        let ty = self.type_name.trim().trim_end_matches('?').trim();
        if let Some(stripped) = ty.strip_suffix("[]") {
            return stripped.trim();
        }
        if let (Some(open), Some(close)) = (ty.find('<'), ty.rfind('>')) {
            if open < close {
                let inner = &ty[open + 1..close];
                // Dictionary<K, V>: the value side is the element.
                return match inner.rfind(',') {
                    Some(comma) => inner[comma + 1..].trim(),
                    None => inner.trim(),
                };
            }
        }
        ty
    }

    /// Find the first attribute whose name contains the given token.
    pub fn attribute_containing(&self, token: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name.contains(token))
    }
}

/// Container classification of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Container {
    /// A plain, non-container type.
    #[default]
    None,
    /// `T[]`
    Array,
    /// `List<T>` / `IList<T>`
    List,
    /// `Dictionary<K, V>` / `IDictionary<K, V>`
    Dictionary,
    /// `ICollection<T>` / `Collection<T>` / `HashSet<T>`
    Collection,
    /// `IEnumerable<T>`
    Enumerable,
}

impl Container {
    /// True for any container shape, including arrays and dictionaries.
    pub fn is_container(&self) -> bool {
        !matches!(self, Container::None)
    }

    /// True for ordered-sequence shapes that DTO generation rewrites to a
    /// concrete list type.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Container::List | Container::Collection | Container::Enumerable)
    }
}

/// The annotated purpose of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Role {
    /// No annotated purpose.
    #[default]
    None,
    /// Primary key / display anchor.
    Identifier,
    /// Included in filter/search UI.
    Searchable,
    /// Navigation to another entity.
    Relationship,
}

impl Role {
    /// Lowercase label used in listings and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Identifier => "identifier",
            Role::Searchable => "searchable",
            Role::Relationship => "relationship",
        }
    }
}

/// A raw annotation as written in the source: printed name plus the raw text
/// of each argument. Matching against these is done by substring, not by
/// structural parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub args: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// First argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}
