//! Skeleton initializer - seeds a fresh or re-typed character.

use darkroster_domain::tables::ATTRIBUTES;
use darkroster_domain::{
    Archetype, ArchetypeInitializer, AttributeStore, Category, Placement, StatKey, StatValue,
};

/// Attributes start at one dot.
const ATTRIBUTE_BASELINE: i32 = 1;

/// Virtues start at one dot.
const VIRTUE_BASELINE: i32 = 1;

/// Virtues every member of the splat starts with. Hunters take their primary
/// virtue from the creed instead.
fn starting_virtues(archetype: Archetype) -> &'static [&'static str] {
    match archetype {
        Archetype::Vampire | Archetype::MortalPlus => &["Conscience", "Self-Control", "Courage"],
        _ => &[],
    }
}

/// Wipes the sheet and writes the splat, attributes, virtues and, when
/// given, the sub-archetype field. Pools are left to propagation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonInitializer;

impl SkeletonInitializer {
    pub fn new() -> Self {
        Self
    }
}

impl ArchetypeInitializer for SkeletonInitializer {
    fn initialize_archetype(
        &self,
        store: &mut dyn AttributeStore,
        archetype: Archetype,
        subtype: Option<&str>,
    ) {
        store.clear();
        store.set_both(StatKey::splat(), StatValue::text(archetype.as_str()));

        for (name, sub) in ATTRIBUTES {
            store.set_both(
                StatKey::new(Placement::new(Category::Attributes, *sub), *name),
                StatValue::Int(ATTRIBUTE_BASELINE),
            );
        }
        for virtue in starting_virtues(archetype) {
            store.set_both(StatKey::virtue(*virtue), StatValue::Int(VIRTUE_BASELINE));
        }
        if let Some(kind) = subtype.map(str::trim).filter(|k| !k.is_empty()) {
            store.set_both(
                StatKey::lineage(archetype.subtype_field()),
                StatValue::text(kind),
            );
        }

        tracing::info!(
            archetype = %archetype,
            subtype = subtype.unwrap_or("-"),
            stats = store.keys().len(),
            "Archetype initialized"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkroster_domain::{subtype, CharacterSheet, Facet};

    #[test]
    fn wipes_and_seeds_attributes() {
        let mut sheet = CharacterSheet::new();
        sheet.set_uniform(StatKey::background("Allies"), StatValue::Int(3));

        SkeletonInitializer.initialize_archetype(&mut sheet, Archetype::Mage, None);

        assert!(!sheet.contains(&StatKey::background("Allies")));
        assert_eq!(
            sheet.get(&StatKey::splat(), Facet::Permanent),
            Some(StatValue::text("Mage"))
        );
        let wits = StatKey::new(Placement::new(Category::Attributes, subtype::MENTAL), "Wits");
        assert_eq!(sheet.permanent_int(&wits), Some(1));
        assert_eq!(sheet.len(), 1 + ATTRIBUTES.len());
    }

    #[test]
    fn vampires_start_with_their_virtues_and_clan() {
        let mut sheet = CharacterSheet::new();
        SkeletonInitializer.initialize_archetype(&mut sheet, Archetype::Vampire, Some("Ventrue"));

        for virtue in ["Conscience", "Self-Control", "Courage"] {
            assert_eq!(sheet.permanent_int(&StatKey::virtue(virtue)), Some(1));
        }
        assert_eq!(
            sheet.get(&StatKey::lineage("Clan"), Facet::Permanent),
            Some(StatValue::text("Ventrue"))
        );
    }

    #[test]
    fn hunters_start_without_virtues() {
        let mut sheet = CharacterSheet::new();
        SkeletonInitializer.initialize_archetype(&mut sheet, Archetype::Hunter, None);
        assert!(sheet.keys().iter().all(|k| k.category != Category::Virtues));
    }
}
