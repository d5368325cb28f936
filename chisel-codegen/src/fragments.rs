//! Named fragment sets handed to the template renderer.

use chisel_core::{Diagnostic, pluralize, split_camel_case};
use chisel_ir::ClassModel;
use indexmap::IndexMap;

use crate::SideEffect;
use crate::generators;

/// An ordered set of named string fragments for one entity.
///
/// Each fragment is meant for substitution into exactly one named
/// placeholder in a template; the set is built once per entity and not
/// retained afterwards.
#[derive(Debug, Clone, Default)]
pub struct Fragments(IndexMap<String, String>);

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the full fragment set for one entity, together with any side
/// effects the relationship mapping produced and the diagnostics for
/// fragments that had to be skipped.
pub fn entity_fragments(model: &ClassModel) -> (Fragments, Vec<SideEffect>, Vec<Diagnostic>) {
    let mut fragments = Fragments::new();
    let plural = pluralize(&model.name);

    fragments.insert("name", &model.name);
    fragments.insert("namePlural", &plural);
    fragments.insert("nameCamel", camel(&model.name));
    fragments.insert("namePluralCamel", camel(&plural));
    fragments.insert("displayName", split_camel_case(&model.name));
    fragments.insert("namespace", &model.namespace);

    fragments.insert("dtoFields", generators::dto_fields(model));
    fragments.insert("validationRules", generators::validation_rules(model));

    let orm = generators::relationship_mappings(model);
    fragments.insert("relationshipConfigurations", orm.code);

    fragments.insert("importMappings", generators::import_mappings(model));
    fragments.insert("exportMappings", generators::export_mappings(model));
    fragments.insert("formFields", generators::form_fields(model));
    fragments.insert("listHeaders", generators::list_headers(model));
    fragments.insert("listCells", generators::list_cells(model));
    fragments.insert("searchPredicate", generators::search_predicate(model));

    (fragments, orm.effects, orm.diagnostics)
}

fn camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
