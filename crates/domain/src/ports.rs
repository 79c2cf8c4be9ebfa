//! Port traits for the collaborators the rules engine consumes.
//!
//! The attribute store, the stat catalog and archetype initialization are
//! owned outside the core; the engine only talks to them through these traits.

use thiserror::Error;

use crate::value_objects::{Archetype, Facet, StatDefinition, StatKey, StatValue, ValueFacets};

// =============================================================================
// Attribute Store
// =============================================================================

/// Hierarchical key-value store of a single character's stats.
pub trait AttributeStore: Send + Sync {
    fn get(&self, key: &StatKey, facet: Facet) -> Option<StatValue>;

    fn facets(&self, key: &StatKey) -> Option<ValueFacets>;

    /// Set one facet. Creates the entry on first write; the other facet of a
    /// new entry starts out equal to `value`.
    fn set(&mut self, key: StatKey, value: StatValue, facet: Facet);

    fn remove(&mut self, key: &StatKey) -> Option<ValueFacets>;

    fn keys(&self) -> Vec<StatKey>;

    fn clear(&mut self);

    fn contains(&self, key: &StatKey) -> bool {
        self.facets(key).is_some()
    }

    /// Set both facets to the same value.
    fn set_both(&mut self, key: StatKey, value: StatValue) {
        self.set(key.clone(), value.clone(), Facet::Permanent);
        self.set(key, value, Facet::Temporary);
    }

    /// First stored key whose name matches `name` case-insensitively.
    fn find_by_name(&self, name: &str) -> Option<StatKey> {
        self.keys()
            .into_iter()
            .find(|k| k.name.eq_ignore_ascii_case(name))
    }
}

// =============================================================================
// Stat Catalog
// =============================================================================

/// Error raised by a catalog backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed catalog entry: {0}")]
    Malformed(String),
}

/// Read-only reference table of canonical stat definitions.
#[cfg_attr(test, mockall::automock)]
pub trait StatCatalog: Send + Sync {
    /// Exact (case-insensitive) lookup by name.
    fn find_stat_definition(&self, name: &str) -> Result<Option<StatDefinition>, CatalogError>;

    /// Every definition whose name contains `name_contains`, case-insensitively.
    fn find_stat_definitions(
        &self,
        name_contains: &str,
    ) -> Result<Vec<StatDefinition>, CatalogError>;
}

// =============================================================================
// Archetype Initialization
// =============================================================================

/// Reseeds the full skeleton of a fresh or re-typed character.
pub trait ArchetypeInitializer: Send + Sync {
    fn initialize_archetype(
        &self,
        store: &mut dyn AttributeStore,
        archetype: Archetype,
        subtype: Option<&str>,
    );
}
