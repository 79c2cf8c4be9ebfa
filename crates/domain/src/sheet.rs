//! In-memory character sheet.
//!
//! A single map from `StatKey` to `ValueFacets`. Nested
//! `category → subtype → name` views are produced on demand for export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::ports::AttributeStore;
use crate::value_objects::{Facet, StatKey, StatValue, ValueFacets};

/// Nested `category → subtype → name → facets` view of a sheet.
pub type NestedSheet = BTreeMap<String, BTreeMap<String, BTreeMap<String, ValueFacets>>>;

/// Every stat of one character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSheet {
    id: CharacterId,
    entries: BTreeMap<StatKey, ValueFacets>,
}

impl CharacterSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: CharacterId) -> Self {
        Self {
            id,
            entries: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatKey, &ValueFacets)> {
        self.entries.iter()
    }

    pub fn set_uniform(&mut self, key: StatKey, value: StatValue) {
        self.entries.insert(key, ValueFacets::uniform(value));
    }

    /// Store both facets as given, replacing any existing entry.
    pub fn insert(&mut self, key: StatKey, facets: ValueFacets) {
        self.entries.insert(key, facets);
    }

    /// Permanent value as an integer, if present and numeric.
    pub fn permanent_int(&self, key: &StatKey) -> Option<i32> {
        self.entries.get(key).and_then(|f| f.permanent.as_int())
    }

    pub fn to_nested(&self) -> NestedSheet {
        let mut nested = NestedSheet::new();
        for (key, facets) in &self.entries {
            nested
                .entry(key.category.as_str().to_string())
                .or_default()
                .entry(key.subtype.to_string())
                .or_default()
                .insert(key.name.clone(), facets.clone());
        }
        nested
    }
}

/// Wire shape of an exported sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetExport {
    pub character_id: CharacterId,
    pub stats: NestedSheet,
}

impl From<&CharacterSheet> for SheetExport {
    fn from(sheet: &CharacterSheet) -> Self {
        Self {
            character_id: sheet.id,
            stats: sheet.to_nested(),
        }
    }
}

impl AttributeStore for CharacterSheet {
    fn get(&self, key: &StatKey, facet: Facet) -> Option<StatValue> {
        self.entries.get(key).map(|f| f.get(facet).clone())
    }

    fn facets(&self, key: &StatKey) -> Option<ValueFacets> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: StatKey, value: StatValue, facet: Facet) {
        match self.entries.get_mut(&key) {
            Some(facets) => facets.set(facet, value),
            None => {
                self.entries.insert(key, ValueFacets::uniform(value));
            }
        }
    }

    fn remove(&mut self, key: &StatKey) -> Option<ValueFacets> {
        self.entries.remove(key)
    }

    fn keys(&self) -> Vec<StatKey> {
        self.entries.keys().cloned().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Permanent integer value of `key`, or `default` when absent or non-numeric.
pub fn read_int(store: &dyn AttributeStore, key: &StatKey, default: i32) -> i32 {
    store
        .get(key, Facet::Permanent)
        .and_then(|v| v.as_int())
        .unwrap_or(default)
}

/// Permanent text value of `key`, trimmed; `None` when absent or blank.
pub fn read_text(store: &dyn AttributeStore, key: &StatKey) -> Option<String> {
    store
        .get(key, Facet::Permanent)
        .map(|v| v.to_string().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{subtype, Category, Placement};

    fn strength() -> StatKey {
        StatKey::new(Placement::new(Category::Attributes, subtype::PHYSICAL), "Strength")
    }

    #[test]
    fn first_write_creates_both_facets() {
        let mut sheet = CharacterSheet::new();
        sheet.set(strength(), StatValue::Int(3), Facet::Temporary);

        let facets = sheet.facets(&strength()).expect("entry created");
        assert_eq!(facets.permanent, StatValue::Int(3));
        assert_eq!(facets.temporary, StatValue::Int(3));
    }

    #[test]
    fn later_writes_touch_one_facet() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(strength(), StatValue::Int(3));
        sheet.set(strength(), StatValue::Int(1), Facet::Temporary);

        assert_eq!(sheet.get(&strength(), Facet::Permanent), Some(StatValue::Int(3)));
        assert_eq!(sheet.get(&strength(), Facet::Temporary), Some(StatValue::Int(1)));
    }

    #[test]
    fn find_by_name_ignores_case() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(strength(), StatValue::Int(2));
        assert_eq!(sheet.find_by_name("STRENGTH"), Some(strength()));
        assert_eq!(sheet.find_by_name("Dexterity"), None);
    }

    #[test]
    fn read_helpers_apply_defaults() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(StatKey::lineage("Clan"), StatValue::text("  "));
        assert_eq!(read_int(&sheet, &strength(), 1), 1);
        assert_eq!(read_text(&sheet, &StatKey::lineage("Clan")), None);
    }

    #[test]
    fn nested_export_groups_by_category_and_subtype() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(strength(), StatValue::Int(4));
        sheet.set_both(StatKey::splat(), StatValue::text("Mage"));

        let nested = sheet.to_nested();
        assert_eq!(
            nested["attributes"]["physical"]["Strength"].permanent,
            StatValue::Int(4)
        );
        assert_eq!(
            nested["other"]["splat"]["Splat"].permanent,
            StatValue::text("Mage")
        );

        let json = serde_json::to_value(SheetExport::from(&sheet)).expect("serializable");
        assert_eq!(json["stats"]["attributes"]["physical"]["Strength"]["permanent"], 4);
    }
}
