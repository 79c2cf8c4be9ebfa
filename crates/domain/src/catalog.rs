//! In-memory stat catalog.
//!
//! `InMemoryCatalog::builtin()` carries the definitions the rules need beyond
//! the plain name tables: instancing rules, point costs and splat
//! restrictions of merits and flaws, and the instanced backgrounds.

use crate::ports::{CatalogError, StatCatalog};
use crate::tables::{TraitCost, FLAWS, MERITS};
use crate::value_objects::{
    subtype, Archetype, Category, Instancing, Placement, StatDefinition,
};

/// Catalog backed by a vector of definitions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    definitions: Vec<StatDefinition>,
}

impl InMemoryCatalog {
    pub fn new(definitions: Vec<StatDefinition>) -> Self {
        Self { definitions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with the built-in definitions.
    pub fn builtin() -> Self {
        let mut definitions = Vec::new();

        for cost in MERITS {
            definitions.push(trait_definition(cost, Category::Merits));
        }
        for cost in FLAWS {
            definitions.push(trait_definition(cost, Category::Flaws));
        }

        let background = Placement::new(Category::Backgrounds, subtype::BACKGROUND);
        for name in ["Allies", "Contacts", "Influence", "Mentor", "Retainers", "Status"] {
            definitions.push(StatDefinition::numeric(
                name,
                background,
                0,
                10,
                Instancing::Optional,
            ));
        }
        definitions.push(StatDefinition::numeric(
            "Resources",
            background,
            0,
            10,
            Instancing::Forbidden,
        ));
        definitions.push(StatDefinition::numeric(
            "Organizational Rank",
            background,
            0,
            5,
            Instancing::Optional,
        ));
        definitions.push(
            StatDefinition::numeric("Generation", background, 0, 5, Instancing::Forbidden)
                .restricted_to(&[Archetype::Vampire]),
        );
        definitions.push(
            StatDefinition::numeric("Avatar", background, 0, 5, Instancing::Forbidden)
                .restricted_to(&[Archetype::Mage]),
        );

        Self { definitions }
    }

    /// Add definitions, replacing any existing entry of the same name.
    pub fn extend(&mut self, definitions: impl IntoIterator<Item = StatDefinition>) {
        for definition in definitions {
            self.definitions
                .retain(|d| !d.name.eq_ignore_ascii_case(&definition.name));
            self.definitions.push(definition);
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &[StatDefinition] {
        &self.definitions
    }
}

fn trait_definition(cost: &TraitCost, category: Category) -> StatDefinition {
    let definition = StatDefinition::numeric(
        cost.name,
        Placement::new(category, cost.subtype),
        cost.min,
        cost.max,
        cost.instancing,
    );
    if cost.restriction.is_empty() {
        definition
    } else {
        definition.restricted_to(cost.restriction)
    }
}

impl StatCatalog for InMemoryCatalog {
    fn find_stat_definition(&self, name: &str) -> Result<Option<StatDefinition>, CatalogError> {
        let wanted = name.trim();
        Ok(self
            .definitions
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(wanted))
            .cloned())
    }

    fn find_stat_definitions(
        &self,
        name_contains: &str,
    ) -> Result<Vec<StatDefinition>, CatalogError> {
        let needle = name_contains.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .definitions
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ValueDomain;

    #[test]
    fn builtin_knows_instancing_rules() {
        let catalog = InMemoryCatalog::builtin();

        let language = catalog
            .find_stat_definition("language")
            .expect("lookup succeeds")
            .expect("language defined");
        assert_eq!(language.instancing, Instancing::Required);
        assert_eq!(language.category, Category::Merits);

        let allies = catalog
            .find_stat_definition("Allies")
            .expect("lookup succeeds")
            .expect("allies defined");
        assert_eq!(allies.instancing, Instancing::Optional);

        let resources = catalog
            .find_stat_definition("Resources")
            .expect("lookup succeeds")
            .expect("resources defined");
        assert_eq!(resources.instancing, Instancing::Forbidden);
    }

    #[test]
    fn builtin_carries_point_costs_and_restrictions() {
        let catalog = InMemoryCatalog::builtin();
        let sire = catalog
            .find_stat_definition("Prestigious Sire")
            .expect("lookup succeeds")
            .expect("merit defined");
        assert_eq!(sire.value_domain, ValueDomain::Numeric { min: 1, max: 1 });
        assert!(sire.allows(Archetype::Vampire));
        assert!(!sire.allows(Archetype::Mage));
    }

    #[test]
    fn substring_search_is_case_insensitive() {
        let catalog = InMemoryCatalog::builtin();
        let hits = catalog.find_stat_definitions("SIRE").expect("search succeeds");
        let names: Vec<_> = hits.iter().map(|d| d.name.as_str()).collect();
        assert!(names.contains(&"Prestigious Sire"));
        assert!(names.contains(&"Infamous Sire"));
        assert!(catalog.find_stat_definitions("  ").expect("search").is_empty());
    }

    #[test]
    fn extend_replaces_same_name() {
        let mut catalog = InMemoryCatalog::builtin();
        let before = catalog.len();
        catalog.extend([StatDefinition::numeric(
            "allies",
            Placement::new(Category::Backgrounds, subtype::BACKGROUND),
            0,
            5,
            Instancing::Required,
        )]);
        assert_eq!(catalog.len(), before);
        let allies = catalog
            .find_stat_definition("Allies")
            .expect("lookup succeeds")
            .expect("allies defined");
        assert_eq!(allies.instancing, Instancing::Required);
    }
}
