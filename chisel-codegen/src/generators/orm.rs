//! Entity-type configuration: relationship mapping statements.

use chisel_core::{Diagnostic, singularize};
use chisel_ir::{ClassModel, PropertyModel, Relationship, RelationshipKind};

use crate::SideEffect;

/// Output of relationship mapping generation.
///
/// Many-to-many relationships queue side effects (linking entity
/// configuration, data-context registration) instead of performing them;
/// incomplete metadata turns into diagnostics instead of panics.
#[derive(Debug, Default)]
pub struct OrmOutput {
    pub code: String,
    pub effects: Vec<SideEffect>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Emit one fluent mapping chain per relationship property, each followed
/// by an eager-load directive for the navigation.
pub fn relationship_mappings(model: &ClassModel) -> OrmOutput {
    let mut out = OrmOutput::default();
    let mut statements: Vec<String> = Vec::new();

    for property in model.relationships() {
        let subject = format!("{}.{}", model.name, property.name);
        let Some(rel) = &property.relationship else {
            out.diagnostics.push(skip(&subject, "no relationship metadata"));
            continue;
        };
        let Some(kind) = rel.kind else {
            out.diagnostics.push(skip(&subject, "missing relationship kind"));
            continue;
        };
        let Some(inverse) = rel.inverse_property.as_deref() else {
            out.diagnostics.push(skip(&subject, "missing inverse property"));
            continue;
        };

        let statement = match kind {
            RelationshipKind::ManyToMany => {
                match many_to_many(model, property, rel, inverse, &mut out.effects) {
                    Ok(statement) => statement,
                    Err(reason) => {
                        out.diagnostics.push(skip(&subject, reason));
                        continue;
                    }
                }
            }
            _ => {
                let Some(foreign_key) = rel.foreign_key_property.as_deref() else {
                    out.diagnostics.push(skip(&subject, "missing foreign key property"));
                    continue;
                };
                single_key_chain(property, rel, kind, inverse, foreign_key)
            }
        };

        statements.push(statement);
        statements.push(format!(
            "        builder.Navigation(x => x.{}).AutoInclude();",
            property.name
        ));
    }

    out.code = statements.join("\n");
    out
}

fn skip(subject: &str, reason: &str) -> Diagnostic {
    Diagnostic::warning("generate", format!("relationship mapping skipped: {reason}")).on(subject)
}

/// One-to-one, one-to-many and many-to-one chains share the shape
/// `builder.<open>(...).<close>(x => x.Inverse).HasForeignKey(...)`.
fn single_key_chain(
    property: &PropertyModel,
    rel: &Relationship,
    kind: RelationshipKind,
    inverse: &str,
    foreign_key: &str,
) -> String {
    let target = property.element_type();
    let (open, close) = match kind {
        RelationshipKind::OneToOne => ("HasOne", "WithOne"),
        RelationshipKind::OneToMany => ("HasMany", "WithOne"),
        RelationshipKind::ManyToOne => ("HasOne", "WithMany"),
        RelationshipKind::ManyToMany => unreachable!("handled separately"),
    };
    // one-to-one needs the dependent entity named on the foreign key
    let has_foreign_key = match kind {
        RelationshipKind::OneToOne => format!(".HasForeignKey<{target}>(x => x.{foreign_key})"),
        _ => format!(".HasForeignKey(x => x.{foreign_key})"),
    };

    let mut statement = format!(
        "        builder.{open}(x => x.{})\n            .{close}(x => x.{inverse})\n            {has_foreign_key}",
        property.name
    );
    if let Some(behavior) = rel.on_delete.as_token() {
        statement.push_str(&format!("\n            .OnDelete(DeleteBehavior.{behavior})"));
    }
    statement.push(';');
    statement
}

fn many_to_many(
    model: &ClassModel,
    property: &PropertyModel,
    rel: &Relationship,
    inverse: &str,
    effects: &mut Vec<SideEffect>,
) -> Result<String, &'static str> {
    let linking = rel
        .linking_table
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or("missing linking table")?;

    // both foreign keys of the linking table, one per side
    let left_key = format!("{}Id", singularize(&property.name));
    let right_key = format!("{}Id", singularize(inverse));
    if left_key == right_key {
        return Err("identical foreign keys on both sides");
    }

    let target = property.element_type();
    let statement = format!(
        "        builder.HasMany(x => x.{name})\n            .WithMany(x => x.{inverse})\n            .UsingEntity<{linking}>(\n                l => l.HasOne<{target}>().WithMany().HasForeignKey(x => x.{left_key}),\n                r => r.HasOne<{owner}>().WithMany().HasForeignKey(x => x.{right_key}));",
        name = property.name,
        owner = model.name,
    );

    effects.push(SideEffect::EmitLinkingEntityConfig {
        linking_table: linking.to_string(),
        left_foreign_key: left_key,
        right_foreign_key: right_key,
    });
    effects.push(SideEffect::RegisterDbSet {
        linking_table: linking.to_string(),
    });

    Ok(statement)
}

#[cfg(test)]
mod tests {
    use chisel_ir::{Attribute, PropertyModel};
    use chisel_parser::enrich_property;

    use super::*;

    fn relationship_prop(name: &str, ty: &str, scaffold_args: &[&str]) -> PropertyModel {
        let mut attr = Attribute::new("Scaffold").arg("Relationship");
        for arg in scaffold_args {
            attr = attr.arg(*arg);
        }
        let mut p = PropertyModel::new(name, ty);
        p.attributes = vec![attr];
        enrich_property(&mut p);
        p
    }

    fn model_with(props: Vec<PropertyModel>) -> ClassModel {
        let mut model = ClassModel::new("Product", "Shop.Domain");
        model.properties = props;
        model
    }

    #[test]
    fn test_many_to_one_chain() {
        let model = model_with(vec![relationship_prop(
            "Category",
            "Category",
            &["ManyToOne", "inverseProperty: \"Products\"", "foreignKeyProperty: \"CategoryId\""],
        )]);
        let out = relationship_mappings(&model);

        assert!(out.diagnostics.is_empty());
        assert!(out.code.contains("builder.HasOne(x => x.Category)"));
        assert!(out.code.contains(".WithMany(x => x.Products)"));
        assert!(out.code.contains(".HasForeignKey(x => x.CategoryId);"));
        // eager-load directive is never suppressed
        assert!(out.code.contains("builder.Navigation(x => x.Category).AutoInclude();"));
    }

    #[test]
    fn test_one_to_many_chain_with_delete_behavior() {
        let model = model_with(vec![relationship_prop(
            "Orders",
            "List<Order>",
            &["OneToMany", "Cascade", "inverseProperty: \"Customer\"", "foreignKeyProperty: \"CustomerId\""],
        )]);
        let out = relationship_mappings(&model);

        assert!(out.code.contains("builder.HasMany(x => x.Orders)"));
        assert!(out.code.contains(".WithOne(x => x.Customer)"));
        assert!(out.code.contains(".OnDelete(DeleteBehavior.Cascade);"));
    }

    #[test]
    fn test_one_to_one_names_dependent_on_foreign_key() {
        let model = model_with(vec![relationship_prop(
            "Profile",
            "Profile",
            &["OneToOne", "inverseProperty: \"Product\"", "foreignKeyProperty: \"ProductId\""],
        )]);
        let out = relationship_mappings(&model);

        assert!(out.code.contains(".WithOne(x => x.Product)"));
        assert!(out.code.contains(".HasForeignKey<Profile>(x => x.ProductId);"));
    }

    #[test]
    fn test_no_delete_clause_when_behavior_unspecified() {
        let model = model_with(vec![relationship_prop(
            "Category",
            "Category",
            &["ManyToOne", "inverseProperty: \"Products\"", "foreignKeyProperty: \"CategoryId\""],
        )]);
        let out = relationship_mappings(&model);
        assert!(!out.code.contains("OnDelete"));
    }

    #[test]
    fn test_many_to_many_wires_two_distinct_keys() {
        let model = model_with(vec![relationship_prop(
            "Tags",
            "List<Tag>",
            &["ManyToMany", "inverseProperty: \"Products\"", "linkingTable: \"ProductTag\""],
        )]);
        let out = relationship_mappings(&model);

        assert!(out.diagnostics.is_empty());
        assert!(out.code.contains(".UsingEntity<ProductTag>("));
        assert!(out.code.contains("HasForeignKey(x => x.TagId)"));
        assert!(out.code.contains("HasForeignKey(x => x.ProductId)"));
        assert_ne!(
            out.code.find("x.TagId"),
            out.code.find("x.ProductId"),
            "both sides must reference distinct keys"
        );

        assert_eq!(out.effects.len(), 2);
        assert_eq!(
            out.effects[0],
            SideEffect::EmitLinkingEntityConfig {
                linking_table: "ProductTag".into(),
                left_foreign_key: "TagId".into(),
                right_foreign_key: "ProductId".into(),
            }
        );
        assert_eq!(
            out.effects[1],
            SideEffect::RegisterDbSet {
                linking_table: "ProductTag".into()
            }
        );
    }

    #[test]
    fn test_many_to_many_without_linking_table_is_skipped() {
        let model = model_with(vec![relationship_prop(
            "Tags",
            "List<Tag>",
            &["ManyToMany", "inverseProperty: \"Products\""],
        )]);
        let out = relationship_mappings(&model);

        assert!(out.code.is_empty());
        assert!(out.effects.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
        assert!(out.diagnostics[0].message.contains("linking table"));
        assert_eq!(out.diagnostics[0].subject.as_deref(), Some("Product.Tags"));
    }

    #[test]
    fn test_missing_foreign_key_is_skipped() {
        let model = model_with(vec![relationship_prop(
            "Category",
            "Category",
            &["ManyToOne", "inverseProperty: \"Products\""],
        )]);
        let out = relationship_mappings(&model);

        assert!(out.code.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
        assert!(out.diagnostics[0].message.contains("foreign key"));
    }

    #[test]
    fn test_empty_model_yields_empty_fragment() {
        let out = relationship_mappings(&model_with(vec![]));
        assert!(out.code.is_empty());
        assert!(out.effects.is_empty());
        assert!(out.diagnostics.is_empty());
    }
}
