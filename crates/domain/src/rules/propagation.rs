//! Helpers shared by the derived-attribute rules.

use super::traits::DerivedUpdate;
use crate::ports::AttributeStore;
use crate::tables;
use crate::value_objects::{ArchetypeState, Facet, StatKey, StatValue, ValueFacets};

/// Storage key of a pool, wherever its table places it.
pub fn pool_key(name: &str) -> Option<StatKey> {
    tables::find_pool(name).map(|(canonical, placement)| StatKey::new(placement, canonical))
}

/// Bring the stored pools in line with the character's pool set: drop the
/// ones it no longer has and seed missing ones at their baseline.
pub fn reseed_pools(store: &dyn AttributeStore, state: &ArchetypeState) -> Vec<DerivedUpdate> {
    let allowed = tables::pool_set(state);
    let mut updates = Vec::new();

    for (name, _) in tables::POOLS {
        let Some(key) = pool_key(name) else { continue };
        if store.contains(&key) && !allowed.iter().any(|s| s.name == *name) {
            updates.push(DerivedUpdate::remove(key));
        }
    }
    for seed in &allowed {
        if let Some(key) = pool_key(seed.name) {
            if !store.contains(&key) {
                updates.push(DerivedUpdate::set(key, seed.baseline));
            }
        }
    }
    updates
}

/// `computed` plus the `seeds` whose keys it does not already touch.
pub fn overlay(seeds: Vec<DerivedUpdate>, computed: Vec<DerivedUpdate>) -> Vec<DerivedUpdate> {
    let mut merged: Vec<DerivedUpdate> = seeds
        .into_iter()
        .filter(|seed| !computed.iter().any(|c| c.key() == seed.key()))
        .collect();
    merged.extend(computed);
    merged
}

/// `Set` unless the stored permanent value already equals `value`.
pub fn set_if_changed(
    store: &dyn AttributeStore,
    key: StatKey,
    value: impl Into<StatValue>,
) -> Option<DerivedUpdate> {
    let value = value.into();
    let unchanged = match (store.get(&key, Facet::Permanent), value.as_int()) {
        (Some(current), Some(n)) => current.as_int() == Some(n),
        (Some(current), None) => current == value,
        (None, _) => false,
    };
    if unchanged {
        return None;
    }
    Some(DerivedUpdate::set(key, value))
}

/// Write `updates` to the store and return the ones that changed something.
pub fn apply_updates(
    store: &mut dyn AttributeStore,
    updates: Vec<DerivedUpdate>,
) -> Vec<DerivedUpdate> {
    let mut applied = Vec::new();
    for update in updates {
        match &update {
            DerivedUpdate::Set { key, value } => {
                if store.facets(key) == Some(ValueFacets::uniform(value.clone())) {
                    continue;
                }
                store.set_both(key.clone(), value.clone());
            }
            DerivedUpdate::Remove { key } => {
                if store.remove(key).is_none() {
                    continue;
                }
            }
        }
        tracing::debug!(key = %update.key(), "Applied derived update");
        applied.push(update);
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CharacterSheet;
    use crate::value_objects::Archetype;

    #[test]
    fn reseed_drops_foreign_pools_and_seeds_missing_ones() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(StatKey::pool("Willpower"), StatValue::Int(6));
        sheet.set_both(StatKey::pool("Rage"), StatValue::Int(4));

        let ghoul = ArchetypeState::new(Archetype::MortalPlus).with_lineage("Type", "Ghoul");
        let updates = reseed_pools(&sheet, &ghoul);

        assert!(updates.contains(&DerivedUpdate::remove(StatKey::pool("Rage"))));
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Blood Pool"), 1)));
        assert!(!updates.iter().any(|u| u.key() == &StatKey::pool("Willpower")));
    }

    #[test]
    fn apply_skips_no_ops() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(StatKey::pool("Willpower"), StatValue::Int(3));

        let applied = apply_updates(
            &mut sheet,
            vec![
                DerivedUpdate::set(StatKey::pool("Willpower"), 3),
                DerivedUpdate::set(StatKey::pool("Rage"), 2),
                DerivedUpdate::remove(StatKey::pool("Gnosis")),
            ],
        );
        assert_eq!(applied, vec![DerivedUpdate::set(StatKey::pool("Rage"), 2)]);
        assert_eq!(sheet.permanent_int(&StatKey::pool("Rage")), Some(2));
    }

    #[test]
    fn overlay_prefers_computed_values() {
        let merged = overlay(
            vec![
                DerivedUpdate::set(StatKey::pool("Gnosis"), 1),
                DerivedUpdate::set(StatKey::pool("Rage"), 1),
            ],
            vec![DerivedUpdate::set(StatKey::pool("Gnosis"), 5)],
        );
        assert_eq!(
            merged,
            vec![
                DerivedUpdate::set(StatKey::pool("Rage"), 1),
                DerivedUpdate::set(StatKey::pool("Gnosis"), 5),
            ]
        );
    }

    #[test]
    fn set_if_changed_compares_numerically() {
        let mut sheet = CharacterSheet::new();
        sheet.set_both(StatKey::pool("Willpower"), StatValue::text("3"));
        assert_eq!(set_if_changed(&sheet, StatKey::pool("Willpower"), 3), None);
        assert!(set_if_changed(&sheet, StatKey::pool("Willpower"), 4).is_some());
    }
}
