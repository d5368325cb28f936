//! DTO field block generation.

use chisel_ir::{ClassModel, Container, PropertyModel, Role};

/// Emit one field declaration per property, each preceded by a description
/// annotation line.
///
/// Shaping rules:
/// - the identifier property is non-nullable with no default
/// - a `string` property named `Name` defaults to the empty string
/// - other plain `string` properties become nullable with no default
/// - array-like string properties become a nullable string array
/// - sequence containers are rewritten to a concrete `List<T>` with an
///   empty-sequence default
/// - remaining known scalars are emitted exactly as declared
pub fn dto_fields(model: &ClassModel) -> String {
    let blocks: Vec<String> = model
        .properties
        .iter()
        .map(|property| {
            let description = property
                .description
                .as_deref()
                .unwrap_or(&property.display_name);
            format!(
                "    [Description(\"{}\")]\n    {}",
                description,
                field_declaration(property)
            )
        })
        .collect();
    blocks.join("\n\n")
}

fn field_declaration(property: &PropertyModel) -> String {
    let name = &property.name;

    if property.role == Role::Identifier {
        let ty = property.type_name.trim_end_matches('?');
        return format!("public {ty} {name} {{ get; set; }}");
    }

    if property.container.is_sequence() {
        return format!(
            "public List<{}> {name} {{ get; set; }} = new();",
            property.element_type()
        );
    }

    if property.element_type() == "string" {
        return match property.container {
            Container::Array => format!("public string[]? {name} {{ get; set; }}"),
            _ if name.eq_ignore_ascii_case("Name") => {
                format!("public string {name} {{ get; set; }} = string.Empty;")
            }
            _ => format!("public string? {name} {{ get; set; }}"),
        };
    }

    if property.is_known_scalar || property.container.is_container() {
        return format!("public {} {name} {{ get; set; }}", property.type_name);
    }

    // domain/complex type: nullable navigation field, no default
    format!("public {}? {name} {{ get; set; }}", property.element_type())
}
