//! Attribute interpretation: classify each property from its raw
//! annotations.
//!
//! Matching is by substring containment on the printed attribute name and
//! argument text, not by structural parsing. This tolerates minor syntax
//! variation but also means an attribute whose name merely contains a
//! recognized token (a hypothetical `NotRequired` contains `Required`) is
//! classified by it. Known fragility, kept as observed behavior.

use chisel_core::split_camel_case;
use chisel_ir::{
    Attribute, ClassModel, DeleteBehavior, PropertyModel, Relationship, RelationshipKind, Role,
};

/// Enrich every property of a model in place. Runs once, after parsing.
pub fn enrich_model(model: &mut ClassModel) {
    for property in &mut model.properties {
        enrich_property(property);
    }
}

/// Enrich a single property from its raw annotations.
///
/// Arguments of the scaffolding annotation are evaluated in argument order;
/// when several role tokens appear, the last matching argument wins
/// (`[Scaffold(Searchable, Identifier)]` classifies as identifier).
pub fn enrich_property(property: &mut PropertyModel) {
    let attributes = property.attributes.clone();
    let mut relationship = Relationship::default();
    let mut had_display = false;

    for attribute in &attributes {
        if attribute.name.contains("Display") {
            if let Some(arg) = attribute.first_arg() {
                property.display_name = named_payload(arg, "Name").unwrap_or_else(|| strip_quotes(arg).to_string());
                had_display = true;
            }
        }
        if attribute.name.contains("Description") {
            if let Some(arg) = attribute.first_arg() {
                property.description = Some(strip_quotes(arg).to_string());
            }
        }
        if attribute.name.contains("Scaffold") {
            apply_scaffold(property, attribute, &mut relationship);
        }
    }

    if !had_display {
        property.display_name = split_camel_case(&property.name);
    }

    // relationship details only exist for relationship-role properties
    property.relationship = (property.role == Role::Relationship).then_some(relationship);
}

fn apply_scaffold(property: &mut PropertyModel, attribute: &Attribute, rel: &mut Relationship) {
    for arg in &attribute.args {
        // role tokens, tested in fixed order within each argument
        if arg.contains("Identifier") {
            property.role = Role::Identifier;
        } else if arg.contains("Searchable") {
            property.role = Role::Searchable;
        } else if arg.contains("Relationship") {
            property.role = Role::Relationship;
        }

        if arg.contains("OneToOne") {
            rel.kind = Some(RelationshipKind::OneToOne);
        } else if arg.contains("OneToMany") {
            rel.kind = Some(RelationshipKind::OneToMany);
        } else if arg.contains("ManyToOne") {
            rel.kind = Some(RelationshipKind::ManyToOne);
        } else if arg.contains("ManyToMany") {
            rel.kind = Some(RelationshipKind::ManyToMany);
        }

        if arg.contains("Cascade") {
            rel.on_delete = DeleteBehavior::Cascade;
        } else if arg.contains("Restrict") {
            rel.on_delete = DeleteBehavior::Restrict;
        } else if arg.contains("SetNull") {
            rel.on_delete = DeleteBehavior::SetNull;
        } else if arg.contains("NoAction") {
            rel.on_delete = DeleteBehavior::NoAction;
        }

        if let Some(payload) = named_payload(arg, "inverseProperty") {
            rel.inverse_property = Some(payload);
        }
        if let Some(payload) = named_payload(arg, "foreignKeyProperty") {
            rel.foreign_key_property = Some(payload);
        }
        if let Some(payload) = named_payload(arg, "linkingTable") {
            rel.linking_table = Some(payload);
        }
    }
}

/// Extract the payload of a `name: value` / `name = value` argument, quotes
/// stripped, when the argument text contains the given name.
fn named_payload(arg: &str, name: &str) -> Option<String> {
    let at = arg.find(name)?;
    let rest = &arg[at + name.len()..];
    let rest = rest.trim_start();
    let rest = rest.strip_prefix([':', '=']).unwrap_or(rest);
    let payload = strip_quotes(rest.trim());
    (!payload.is_empty()).then(|| payload.to_string())
}

fn strip_quotes(s: &str) -> &str {
    s.trim().trim_start_matches('@').trim_matches('"').trim()
}
