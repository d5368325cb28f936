//! Import/export row-mapping expressions.

use chisel_core::ScalarKind;
use chisel_ir::{ClassModel, Container, PropertyModel, Role};

/// Emit one row-to-field conversion per known-scalar, non-identifier
/// property. The conversion function is chosen by the declared type prefix.
pub fn import_mappings(model: &ClassModel) -> String {
    let lines: Vec<String> = portable(model)
        .map(|property| {
            let cell = format!("row[nameof({}.{})]", model.name, property.name);
            let expr = convert_expr(ScalarKind::from_type_text(&property.type_name), &cell);
            format!("        item.{} = {};", property.name, expr)
        })
        .collect();
    lines.join("\n")
}

/// Emit one field-to-cell writer per known-scalar, non-identifier property.
pub fn export_mappings(model: &ClassModel) -> String {
    let lines: Vec<String> = portable(model)
        .map(|property| {
            format!(
                "        row[nameof({owner}.{name})] = item.{name};",
                owner = model.name,
                name = property.name
            )
        })
        .collect();
    lines.join("\n")
}

fn portable(model: &ClassModel) -> impl Iterator<Item = &PropertyModel> {
    model.properties.iter().filter(|p| {
        p.is_known_scalar && p.role != Role::Identifier && p.container == Container::None
    })
}

fn convert_expr(kind: ScalarKind, cell: &str) -> String {
    match kind {
        ScalarKind::Bool => format!("Convert.ToBoolean({cell})"),
        ScalarKind::Byte => format!("Convert.ToByte({cell})"),
        ScalarKind::Short => format!("Convert.ToInt16({cell})"),
        ScalarKind::Int => format!("Convert.ToInt32({cell})"),
        ScalarKind::Long => format!("Convert.ToInt64({cell})"),
        ScalarKind::Float => format!("Convert.ToSingle({cell})"),
        ScalarKind::Double => format!("Convert.ToDouble({cell})"),
        ScalarKind::Decimal => format!("Convert.ToDecimal({cell})"),
        ScalarKind::DateTime => format!("Convert.ToDateTime({cell})"),
        ScalarKind::Guid => format!("Guid.Parse({cell}.ToString())"),
        ScalarKind::Char => format!("Convert.ToChar({cell})"),
        ScalarKind::Text => format!("{cell}.ToString()"),
    }
}
