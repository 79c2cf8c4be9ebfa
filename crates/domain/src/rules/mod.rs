//! Archetype rule sets.
//!
//! One `ArchetypeRules` implementation per splat, dispatched through
//! `RulesRegistry`. The registry runs the checks every splat shares (splat
//! membership, access tables, value domains) around the rule set's own
//! validation, and applies derived updates after a write.
//!
//! # Rule sets
//!
//! - Vampire (`vampire`)
//! - Shifter (`shifter`)
//! - Mage (`mage`)
//! - Changeling (`changeling`)
//! - Hunter (`hunter`)
//! - Mortal+ (`mortal_plus`)
//! - Possessed (`possessed`)

mod changeling;
pub mod common;
mod hunter;
mod mage;
mod mortal_plus;
mod possessed;
mod propagation;
mod shifter;
mod traits;
mod vampire;

pub use changeling::ChangelingRules;
pub use hunter::HunterRules;
pub use mage::MageRules;
pub use mortal_plus::MortalPlusRules;
pub use possessed::PossessedRules;
pub use propagation::{apply_updates, pool_key};
pub use shifter::ShifterRules;
pub use traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
pub use vampire::{blood_pool_max, VampireRules};

use std::sync::Arc;

use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::suggest::SuggestionPolicy;
use crate::value_objects::{
    subtype, Archetype, ArchetypeState, Category, StatDefinition, StatKey, StatValue,
};

/// Registry of archetype rule sets.
pub struct RulesRegistry {
    rules: Vec<Arc<dyn ArchetypeRules>>,
    policy: SuggestionPolicy,
}

impl Default for RulesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesRegistry {
    /// Create a registry with the rule sets of all seven splats.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(VampireRules));
        registry.register(Arc::new(ShifterRules));
        registry.register(Arc::new(MageRules));
        registry.register(Arc::new(ChangelingRules));
        registry.register(Arc::new(HunterRules));
        registry.register(Arc::new(MortalPlusRules));
        registry.register(Arc::new(PossessedRules));
        registry
    }

    /// Create an empty registry without built-in rule sets.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            policy: SuggestionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SuggestionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SuggestionPolicy {
        self.policy
    }

    /// Register a rule set, replacing any earlier one for the same splat.
    pub fn register(&mut self, rules: Arc<dyn ArchetypeRules>) {
        self.rules.retain(|r| r.archetype() != rules.archetype());
        self.rules.push(rules);
    }

    pub fn get(&self, archetype: Archetype) -> Option<Arc<dyn ArchetypeRules>> {
        self.rules
            .iter()
            .find(|r| r.archetype() == archetype)
            .cloned()
    }

    /// List all splats with a registered rule set.
    pub fn archetypes(&self) -> Vec<Archetype> {
        self.rules.iter().map(|r| r.archetype()).collect()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate a write of `value` (or a removal, for `None`) to `stat`.
    ///
    /// Returns the normalized value to store. `definition` is the catalog
    /// entry for the stat's name, if any; it only applies when it describes
    /// the same placement.
    pub fn validate(
        &self,
        store: &dyn AttributeStore,
        stat: &ResolvedStat,
        value: Option<&StatValue>,
        definition: Option<&StatDefinition>,
    ) -> Result<Option<StatValue>, ValidationFailure> {
        if stat.placement.is(Category::Other, subtype::SPLAT) {
            return self.validate_splat(value).map(Some);
        }

        let state = ArchetypeState::from_store(store);
        let Some(archetype) = state.archetype else {
            return Err(ValidationFailure::new(format!(
                "The splat must be set before {} can be changed.",
                stat.name
            )));
        };

        if stat.placement.category == Category::Other
            || stat.placement.category.find_subtype(stat.placement.subtype).is_none()
        {
            return Err(ValidationFailure::new(format!(
                "{} cannot be stored under {}.",
                stat.name, stat.placement
            )));
        }

        let rules = self.get(archetype).ok_or_else(|| {
            ValidationFailure::new(format!("No rules are registered for {} characters.", archetype))
        })?;
        let definition = definition.filter(|d| d.placement().ok() == Some(stat.placement));
        let ctx = RuleContext::new(store, &state, self.policy);

        common::check_shared_access(stat, &state, definition)?;
        rules.check_access(&ctx, stat)?;

        let Some(value) = value else {
            return Ok(None);
        };
        match rules.validate(&ctx, stat, value)? {
            Verdict::Accept(normalized) => Ok(Some(normalized)),
            Verdict::Defer => {
                common::shared_domain(stat, value, definition, &self.policy).map(Some)
            }
        }
    }

    fn validate_splat(&self, value: Option<&StatValue>) -> Result<StatValue, ValidationFailure> {
        let Some(value) = value else {
            return Err(ValidationFailure::new(
                "The splat cannot be cleared; set a different splat instead.",
            ));
        };
        common::enumerated("splat", value, Archetype::names(), &self.policy)
    }

    // =========================================================================
    // Propagation
    // =========================================================================

    /// Recompute what depends on `changed` and write it. A change to the
    /// splat or the sub-archetype field recomputes everything.
    pub fn propagate(
        &self,
        store: &mut dyn AttributeStore,
        changed: &StatKey,
    ) -> Vec<DerivedUpdate> {
        let state = ArchetypeState::from_store(&*store);
        let Some(rules) = state.archetype.and_then(|a| self.get(a)) else {
            return Vec::new();
        };
        let full = *changed == StatKey::splat()
            || (changed.category == Category::Identity
                && changed.subtype == subtype::LINEAGE
                && changed
                    .name
                    .eq_ignore_ascii_case(rules.archetype().subtype_field()));

        let updates = if full {
            tracing::debug!(archetype = %rules.archetype(), "Recomputing all derived values");
            rules.recompute_all(&*store, &state)
        } else {
            rules.propagate(&*store, &state, changed)
        };
        apply_updates(store, updates)
    }

    /// Recompute and write every derived value of the character.
    pub fn recompute_all(&self, store: &mut dyn AttributeStore) -> Vec<DerivedUpdate> {
        let state = ArchetypeState::from_store(&*store);
        let Some(rules) = state.archetype.and_then(|a| self.get(a)) else {
            return Vec::new();
        };
        let updates = rules.recompute_all(&*store, &state);
        apply_updates(store, updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::ports::StatCatalog;
    use crate::sheet::CharacterSheet;
    use crate::value_objects::{Facet, Placement};

    fn sheet(splat: &str, kind: Option<&str>) -> CharacterSheet {
        let mut sheet = CharacterSheet::new();
        sheet.set_uniform(StatKey::splat(), StatValue::text(splat));
        if let Some(kind) = kind {
            let archetype: Archetype = splat.parse().expect("known splat");
            sheet.set_uniform(StatKey::lineage(archetype.subtype_field()), StatValue::text(kind));
        }
        sheet
    }

    fn stat(name: &str, category: Category, sub: &'static str) -> ResolvedStat {
        ResolvedStat::new(name, Placement::new(category, sub))
    }

    fn int(n: i32) -> StatValue {
        StatValue::Int(n)
    }

    #[test]
    fn registry_includes_all_splats() {
        let registry = RulesRegistry::new();
        assert_eq!(registry.archetypes(), Archetype::ALL.to_vec());
        assert!(RulesRegistry::empty().get(Archetype::Mage).is_none());
    }

    #[test]
    fn splat_is_enumerated_and_cannot_be_cleared() {
        let registry = RulesRegistry::new();
        let splat = stat("Splat", Category::Other, subtype::SPLAT);
        let empty = CharacterSheet::new();

        assert_eq!(
            registry.validate(&empty, &splat, Some(&StatValue::text("mortal+")), None),
            Ok(Some(StatValue::text("Mortal+")))
        );
        let err = registry
            .validate(&empty, &splat, Some(&StatValue::text("Vampyre")), None)
            .unwrap_err();
        assert!(err.suggestions.contains(&"Vampire".to_string()));
        assert!(registry.validate(&empty, &splat, None, None).is_err());
    }

    #[test]
    fn nothing_validates_without_a_splat() {
        let registry = RulesRegistry::new();
        let strength = stat("Strength", Category::Attributes, subtype::PHYSICAL);
        let err = registry
            .validate(&CharacterSheet::new(), &strength, Some(&int(3)), None)
            .unwrap_err();
        assert_eq!(err.message, "The splat must be set before Strength can be changed.");
    }

    #[test]
    fn category_ranges_accept_bounds_and_reject_neighbours() {
        let registry = RulesRegistry::new();
        let vampire = sheet("Vampire", Some("Brujah"));
        let cases = [
            (stat("Strength", Category::Attributes, subtype::PHYSICAL), 1, 5),
            (stat("Melee", Category::Abilities, subtype::SKILL), 0, 5),
            (stat("Torture", Category::SecondaryAbilities, subtype::SECONDARY_SKILL), 0, 5),
            (stat("Allies", Category::Backgrounds, subtype::BACKGROUND), 0, 10),
            (stat("Courage", Category::Virtues, subtype::MORAL), 0, 5),
            (stat("Potence", Category::Powers, subtype::DISCIPLINE), 0, 5),
            (stat("Willpower", Category::Pools, subtype::DUAL), 0, 10),
            (stat("Iron Will", Category::Merits, subtype::MENTAL), 1, 7),
            (stat("Organizational Rank", Category::Backgrounds, subtype::BACKGROUND), 0, 5),
        ];
        for (stat, min, max) in cases {
            for ok in [min, max] {
                assert!(
                    registry.validate(&vampire, &stat, Some(&int(ok)), None).is_ok(),
                    "{} = {}",
                    stat.name,
                    ok
                );
            }
            for bad in [min - 1, max + 1] {
                assert!(
                    registry.validate(&vampire, &stat, Some(&int(bad)), None).is_err(),
                    "{} = {}",
                    stat.name,
                    bad
                );
            }
        }
    }

    #[test]
    fn combination_disciplines_keep_text() {
        let registry = RulesRegistry::new();
        let combo = stat("Iron Heart", Category::Powers, subtype::COMBODISCIPLINE);
        assert_eq!(
            registry.validate(&sheet("Vampire", None), &combo, Some(&StatValue::text("Known")), None),
            Ok(Some(StatValue::text("Known")))
        );
    }

    #[test]
    fn exclusive_stats_fail_for_every_other_splat() {
        let registry = RulesRegistry::new();
        let exclusives = [
            (Archetype::Vampire, stat("Herd", Category::Backgrounds, subtype::BACKGROUND)),
            (Archetype::Vampire, stat("Necromancy", Category::Powers, subtype::DISCIPLINE)),
            (Archetype::Shifter, stat("Rituals", Category::Abilities, subtype::KNOWLEDGE)),
            (Archetype::Mage, stat("Forces", Category::Powers, subtype::SPHERE)),
            (Archetype::Changeling, stat("Chicanery", Category::Powers, subtype::ART)),
            (Archetype::Hunter, stat("Zeal", Category::Virtues, subtype::MORAL)),
            (Archetype::MortalPlus, stat("Domitor", Category::Identity, subtype::LINEAGE)),
            (Archetype::Possessed, stat("Berserker", Category::Powers, subtype::BLESSING)),
            (Archetype::Possessed, stat("Spirit Sight", Category::Powers, subtype::CHARM)),
        ];
        for (owner, stat) in exclusives {
            for other in Archetype::ALL.into_iter().filter(|a| *a != owner) {
                let store = sheet(other.as_str(), None);
                for value in [Some(&int(1)), None] {
                    let err = registry
                        .validate(&store, &stat, value, None)
                        .expect_err("exclusive stat");
                    assert!(err.is_exclusivity(), "{} for {}: {}", stat.name, other, err);
                }
            }
        }
    }

    #[test]
    fn possessed_powers_follow_the_type() {
        let registry = RulesRegistry::new();
        let blessing = stat("Berserker", Category::Powers, subtype::BLESSING);
        let charm = stat("Spirit Sight", Category::Powers, subtype::CHARM);
        let fomori = sheet("Possessed", Some("Fomori"));
        let kami = sheet("Possessed", Some("Kami"));

        assert!(registry.validate(&fomori, &blessing, Some(&int(1)), None).is_ok());
        assert!(registry.validate(&kami, &charm, Some(&int(1)), None).is_ok());
        for (store, power) in [(&kami, &blessing), (&fomori, &charm)] {
            let err = registry
                .validate(store, power, Some(&int(1)), None)
                .expect_err("power of the other type");
            assert!(err.is_exclusivity(), "{}: {}", power.name, err);
        }
    }

    #[test]
    fn removal_skips_value_checks_but_not_access() {
        let registry = RulesRegistry::new();
        let vampire = sheet("Vampire", None);
        let strength = stat("Strength", Category::Attributes, subtype::PHYSICAL);
        assert_eq!(registry.validate(&vampire, &strength, None, None), Ok(None));

        let arete = stat("Arete", Category::Pools, subtype::ADVANTAGE);
        assert!(registry.validate(&vampire, &arete, None, None).is_err());
    }

    #[test]
    fn catalog_definitions_apply_only_to_their_placement() {
        let registry = RulesRegistry::new();
        let catalog = InMemoryCatalog::builtin();
        let gnosis = catalog
            .find_stat_definition("Gnosis")
            .expect("catalog available")
            .expect("gnosis merit");

        let garou = sheet("Shifter", Some("Garou"));
        let pool = stat("Gnosis", Category::Pools, subtype::DUAL);
        assert_eq!(
            registry.validate(&garou, &pool, Some(&int(8)), Some(&gnosis)),
            Ok(Some(int(8)))
        );

        let kinfolk = sheet("Mortal+", Some("Kinfolk"));
        let merit = stat("Gnosis", Category::Merits, subtype::SUPERNATURAL);
        assert!(registry.validate(&kinfolk, &merit, Some(&int(4)), Some(&gnosis)).is_err());
        assert!(registry.validate(&kinfolk, &merit, Some(&int(5)), Some(&gnosis)).is_ok());
    }

    #[test]
    fn splat_change_reseeds_and_is_idempotent() {
        let registry = RulesRegistry::new();
        let mut store = sheet("Mage", None);
        store.set_uniform(StatKey::pool("Blood Pool"), int(10));

        let updates = registry.propagate(&mut store, &StatKey::splat());
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::pool("Blood Pool"))));
        assert_eq!(store.permanent_int(&StatKey::pool("Willpower")), Some(5));
        let arete = pool_key("Arete").expect("known pool");
        assert_eq!(store.permanent_int(&arete), Some(1));

        let before = store.clone();
        assert!(registry.propagate(&mut store, &StatKey::splat()).is_empty());
        assert!(registry.recompute_all(&mut store).is_empty());
        assert_eq!(store, before);
    }

    #[test]
    fn derived_values_are_idempotent_for_every_splat() {
        let registry = RulesRegistry::new();
        let kinds = [
            ("Vampire", "Ventrue"),
            ("Shifter", "Garou"),
            ("Mage", "Technocracy"),
            ("Changeling", "Sidhe"),
            ("Hunter", "Judge"),
            ("Mortal+", "Ghoul"),
            ("Possessed", "Kami"),
        ];
        for (splat, kind) in kinds {
            let mut store = sheet(splat, Some(kind));
            registry.recompute_all(&mut store);
            let once = store.clone();
            assert!(registry.recompute_all(&mut store).is_empty(), "{}", splat);
            assert_eq!(store, once, "{}", splat);
        }
    }

    #[test]
    fn derived_writes_set_both_facets() {
        let registry = RulesRegistry::new();
        let mut store = sheet("Vampire", Some("Tremere"));
        store.set_uniform(StatKey::pool("Willpower"), int(1));
        store.set(StatKey::pool("Willpower"), int(0), Facet::Temporary);
        store.set_uniform(StatKey::virtue("Courage"), int(3));

        registry.propagate(&mut store, &StatKey::virtue("Courage"));
        assert_eq!(store.get(&StatKey::pool("Willpower"), Facet::Permanent), Some(int(3)));
        assert_eq!(store.get(&StatKey::pool("Willpower"), Facet::Temporary), Some(int(3)));
    }
}
