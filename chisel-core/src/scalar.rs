//! Known-scalar type classification.
//!
//! A "known scalar" is a type on the fixed allow-list below; everything else
//! is treated as a domain/complex type and gets navigation treatment instead
//! of simple-field treatment.

/// The fixed allow-list of simple field types.
const KNOWN_SCALAR_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "short", "ushort", "string", "DateTime", "DateTimeOffset", "DateOnly", "TimeSpan", "Guid",
];

/// True when the type text (after trimming a trailing nullable marker) is on
/// the known-scalar allow-list.
pub fn is_known_scalar_type(type_text: &str) -> bool {
    let trimmed = type_text.trim().trim_end_matches('?').trim();
    KNOWN_SCALAR_TYPES.contains(&trimmed)
}

/// Dispatch key for scalar-typed code generation (conversion expressions,
/// UI input kinds).
///
/// Classification is by declared-type *prefix*, mirroring the conversion
/// table it feeds: a type that matches no prefix falls back to [`Text`]
/// (string passthrough).
///
/// [`Text`]: ScalarKind::Text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    DateTime,
    Guid,
    Char,
    Text,
}

impl ScalarKind {
    /// Classify a declared type text by prefix.
    pub fn from_type_text(type_text: &str) -> Self {
        let ty = type_text.trim().trim_end_matches('?').trim();
        const PREFIXES: &[(&str, ScalarKind)] = &[
            ("bool", ScalarKind::Bool),
            ("byte", ScalarKind::Byte),
            ("short", ScalarKind::Short),
            ("int", ScalarKind::Int),
            ("long", ScalarKind::Long),
            ("float", ScalarKind::Float),
            ("double", ScalarKind::Double),
            ("decimal", ScalarKind::Decimal),
            ("DateTime", ScalarKind::DateTime),
            ("Guid", ScalarKind::Guid),
            ("char", ScalarKind::Char),
        ];
        for (prefix, kind) in PREFIXES {
            if ty.starts_with(prefix) {
                return *kind;
            }
        }
        ScalarKind::Text
    }

    /// True for the numeric kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarKind::Byte
                | ScalarKind::Short
                | ScalarKind::Int
                | ScalarKind::Long
                | ScalarKind::Float
                | ScalarKind::Double
                | ScalarKind::Decimal
        )
    }
}
