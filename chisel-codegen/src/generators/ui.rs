//! UI form-field and table-column markup.

use chisel_core::ScalarKind;
use chisel_ir::{ClassModel, Container, PropertyModel, Role};

/// Emit one typed input fragment per displayable property: text field,
/// checkbox, numeric field (zero minimum) or date picker, with required-ness
/// and a localized label derived from the display name.
pub fn form_fields(model: &ClassModel) -> String {
    let fields: Vec<String> = displayable(model).map(form_field).collect();
    fields.join("\n")
}

fn form_field(property: &PropertyModel) -> String {
    let name = &property.name;
    let label = &property.display_name;
    let required = property.attribute_containing("Required").is_some();

    let kind = ScalarKind::from_type_text(&property.type_name);
    let mut field = if kind == ScalarKind::Bool {
        format!("        <MudCheckBox @bind-Value=\"Model.{name}\" Label=\"@L[\"{label}\"]\"")
    } else if kind.is_numeric() {
        format!(
            "        <MudNumericField @bind-Value=\"Model.{name}\" Label=\"@L[\"{label}\"]\" Min=\"0\""
        )
    } else if kind == ScalarKind::DateTime {
        format!("        <MudDatePicker @bind-Date=\"Model.{name}\" Label=\"@L[\"{label}\"]\"")
    } else {
        format!("        <MudTextField @bind-Value=\"Model.{name}\" Label=\"@L[\"{label}\"]\"")
    };

    if required {
        field.push_str(" Required=\"true\"");
    }
    field.push_str(" />");
    field
}

/// Emit one table header cell per column, identifier column first.
pub fn list_headers(model: &ClassModel) -> String {
    let headers: Vec<String> = columns(model)
        .map(|property| format!("        <MudTh>@L[\"{}\"]</MudTh>", property.display_name))
        .collect();
    headers.join("\n")
}

/// Emit one table row cell per column, identifier column first.
pub fn list_cells(model: &ClassModel) -> String {
    let cells: Vec<String> = columns(model)
        .map(|property| {
            format!(
                "        <MudTd DataLabel=\"{}\">@context.{}</MudTd>",
                property.display_name, property.name
            )
        })
        .collect();
    cells.join("\n")
}

/// Emit the filter predicate for the list page's search box: one clause per
/// searchable property, or `true` when nothing is searchable.
pub fn search_predicate(model: &ClassModel) -> String {
    let clauses: Vec<String> = model
        .searchable()
        .filter(|p| p.is_known_scalar && p.container == Container::None)
        .map(search_clause)
        .collect();
    if clauses.is_empty() {
        return "true".to_string();
    }
    format!(
        "string.IsNullOrWhiteSpace(Search)\n        || {}",
        clauses.join("\n        || ")
    )
}

fn search_clause(property: &PropertyModel) -> String {
    let name = &property.name;
    // string fields other than the non-null Name come through as nullable
    if property.element_type() == "string" {
        if name.eq_ignore_ascii_case("Name") {
            format!("item.{name}.Contains(Search, StringComparison.OrdinalIgnoreCase)")
        } else {
            format!("item.{name}?.Contains(Search, StringComparison.OrdinalIgnoreCase) == true")
        }
    } else {
        format!("item.{name}.ToString().Contains(Search, StringComparison.OrdinalIgnoreCase)")
    }
}

fn displayable(model: &ClassModel) -> impl Iterator<Item = &PropertyModel> {
    model.properties.iter().filter(|p| {
        p.is_known_scalar && p.role != Role::Identifier && p.container == Container::None
    })
}

fn columns(model: &ClassModel) -> impl Iterator<Item = &PropertyModel> {
    model.identifier().into_iter().chain(displayable(model))
}
