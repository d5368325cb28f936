//! Fluent validation rule generation.

use chisel_ir::{Attribute, ClassModel, PropertyModel};

/// Emit one rule chain per property that carries validation annotations.
///
/// Recognized annotations: required (not-empty), max-length, range
/// (inclusive-between) and regular-expression (pattern match). The `@`
/// literal-prefix marker on regex pattern text is stripped before emission.
pub fn validation_rules(model: &ClassModel) -> String {
    let rules: Vec<String> = model
        .properties
        .iter()
        .filter_map(rule_for)
        .collect();
    rules.join("\n")
}

fn rule_for(property: &PropertyModel) -> Option<String> {
    let mut chain = String::new();

    for attribute in &property.attributes {
        if attribute.name.contains("Required") {
            chain.push_str(&format!(
                ".NotEmpty().WithMessage(\"{} is required.\")",
                property.display_name
            ));
        } else if attribute.name.contains("MaxLength") {
            if let Some(limit) = attribute.first_arg() {
                chain.push_str(&format!(
                    ".MaximumLength({limit}).WithMessage(\"{} must not exceed {limit} characters.\")",
                    property.display_name
                ));
            }
        } else if attribute.name.contains("RegularExpression") {
            if let Some(pattern) = attribute.first_arg() {
                let pattern = strip_pattern(pattern);
                let message = error_message(attribute)
                    .unwrap_or_else(|| format!("{} format is invalid.", property.display_name));
                chain.push_str(&format!(
                    ".Matches(\"{pattern}\").WithMessage(\"{message}\")"
                ));
            }
        } else if attribute.name.contains("Range") {
            if let [min, max, ..] = attribute.args.as_slice() {
                chain.push_str(&format!(
                    ".InclusiveBetween({min}, {max}).WithMessage(\"{} must be between {min} and {max}.\")",
                    property.display_name
                ));
            }
        }
    }

    if chain.is_empty() {
        return None;
    }
    Some(format!("        RuleFor(x => x.{}){};", property.name, chain))
}

/// Strip the literal-prefix marker and surrounding quotes from raw pattern
/// text: `@"^[A-Z]+$"` becomes `^[A-Z]+$`.
fn strip_pattern(raw: &str) -> &str {
    raw.trim().trim_start_matches('@').trim_matches('"')
}

fn error_message(attribute: &Attribute) -> Option<String> {
    attribute.args.iter().find_map(|arg| {
        let at = arg.find("ErrorMessage")?;
        let rest = arg[at + "ErrorMessage".len()..].trim_start();
        let rest = rest.strip_prefix('=').unwrap_or(rest);
        let message = rest.trim().trim_matches('"');
        (!message.is_empty()).then(|| message.to_string())
    })
}

#[cfg(test)]
mod tests {
    use chisel_ir::PropertyModel;
    use chisel_parser::enrich_property;

    use super::*;

    fn prop(name: &str, ty: &str, attributes: Vec<Attribute>) -> PropertyModel {
        let mut p = PropertyModel::new(name, ty);
        p.attributes = attributes;
        enrich_property(&mut p);
        p
    }

    fn model_with(props: Vec<PropertyModel>) -> ClassModel {
        let mut model = ClassModel::new("Product", "Shop.Domain");
        model.properties = props;
        model
    }

    #[test]
    fn test_required_rule() {
        let model = model_with(vec![prop("Name", "string", vec![Attribute::new("Required")])]);
        assert_eq!(
            validation_rules(&model),
            "        RuleFor(x => x.Name).NotEmpty().WithMessage(\"Name is required.\");"
        );
    }

    #[test]
    fn test_max_length_interpolates_limit() {
        let model = model_with(vec![prop(
            "Name",
            "string",
            vec![Attribute::new("MaxLength").arg("100")],
        )]);
        assert!(validation_rules(&model).contains(
            ".MaximumLength(100).WithMessage(\"Name must not exceed 100 characters.\")"
        ));
    }

    #[test]
    fn test_range_interpolates_bounds() {
        let model = model_with(vec![prop(
            "Price",
            "decimal",
            vec![Attribute::new("Range").arg("0").arg("10000")],
        )]);
        assert!(validation_rules(&model).contains(
            ".InclusiveBetween(0, 10000).WithMessage(\"Price must be between 0 and 10000.\")"
        ));
    }

    #[test]
    fn test_regex_strips_literal_prefix() {
        let model = model_with(vec![prop(
            "Code",
            "string",
            vec![
                Attribute::new("RegularExpression")
                    .arg("@\"^[A-Z]+$\"")
                    .arg("ErrorMessage = \"Uppercase only\""),
            ],
        )]);
        let rules = validation_rules(&model);
        assert!(rules.contains(".Matches(\"^[A-Z]+$\")"));
        assert!(rules.contains(".WithMessage(\"Uppercase only\")"));
    }

    #[test]
    fn test_regex_default_message() {
        let model = model_with(vec![prop(
            "Code",
            "string",
            vec![Attribute::new("RegularExpression").arg("@\"\\d+\"")],
        )]);
        assert!(validation_rules(&model).contains("Code format is invalid."));
    }

    #[test]
    fn test_annotations_chain_into_one_rule() {
        let model = model_with(vec![prop(
            "Name",
            "string",
            vec![Attribute::new("Required"), Attribute::new("MaxLength").arg("50")],
        )]);
        let rules = validation_rules(&model);
        assert_eq!(rules.lines().count(), 1);
        assert!(rules.contains(".NotEmpty()"));
        assert!(rules.contains(".MaximumLength(50)"));
    }

    #[test]
    fn test_unannotated_properties_yield_nothing() {
        let model = model_with(vec![prop("Comment", "string", vec![])]);
        assert_eq!(validation_rules(&model), "");
    }
}
