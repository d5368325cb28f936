//! Side effects queued by fragment generation.
//!
//! Many-to-many relationships need more than a fragment: the linking entity
//! wants its own configuration file, and the data context needs a queryable
//! collection for it. The generators stay pure by returning these as values;
//! the scaffolder applies them after the entity's own artifacts.

/// A deferred scaffolding action produced while generating fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Emit an entity-type configuration file for a many-to-many linking
    /// entity, keyed by both foreign keys.
    EmitLinkingEntityConfig {
        linking_table: String,
        left_foreign_key: String,
        right_foreign_key: String,
    },
    /// Register the linking entity as a queryable collection on the data
    /// context surface.
    RegisterDbSet { linking_table: String },
}

impl SideEffect {
    /// The linking entity this effect concerns.
    pub fn linking_table(&self) -> &str {
        match self {
            SideEffect::EmitLinkingEntityConfig { linking_table, .. } => linking_table,
            SideEffect::RegisterDbSet { linking_table } => linking_table,
        }
    }
}
