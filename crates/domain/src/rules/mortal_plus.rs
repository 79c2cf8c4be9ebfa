//! Mortal+ rules. Most of what a Mortal+ may hold depends on the type
//! (ghoul, kinfolk, kinain, sorcerer, psychic, faithful).

use super::common::{enumerated, exclusive, numeric, requires, shared_rules};
use super::propagation::{overlay, reseed_pools, set_if_changed};
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::sheet::read_int;
use crate::tables;
use crate::value_objects::{subtype, Archetype, ArchetypeState, Category, StatKey, StatValue};

/// Identity fields that only one type carries.
const TYPE_FIELDS: &[(&str, &str)] = &[
    ("Domitor", "Ghoul"),
    ("Tribe", "Kinfolk"),
    ("Kith", "Kinain"),
    ("Fellowship", "Sorcerer"),
];

/// Most blood a ghoul can carry.
const GHOUL_BLOOD_POOL: i32 = 10;

fn field_type(field: &str) -> Option<&'static str> {
    TYPE_FIELDS
        .iter()
        .find(|(f, _)| f.eq_ignore_ascii_case(field))
        .map(|(_, kind)| *kind)
}

pub struct MortalPlusRules;

impl MortalPlusRules {
    fn willpower(&self, store: &dyn AttributeStore) -> Option<DerivedUpdate> {
        let courage = read_int(store, &StatKey::virtue("Courage"), 1);
        set_if_changed(store, StatKey::pool("Willpower"), courage)
    }

    fn stale_fields(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Vec<DerivedUpdate> {
        TYPE_FIELDS
            .iter()
            .filter(|(_, kind)| !state.is_kind(Archetype::MortalPlus, kind))
            .map(|(field, _)| StatKey::lineage(*field))
            .filter(|key| store.contains(key))
            .map(DerivedUpdate::remove)
            .collect()
    }
}

impl ArchetypeRules for MortalPlusRules {
    fn archetype(&self) -> Archetype {
        Archetype::MortalPlus
    }

    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let name = stat.name.as_str();
        if stat.placement.subtype == subtype::GIFT {
            if let Some((canonical, owners)) = tables::gift(name) {
                if !tables::gift_owned(owners, ctx.state) {
                    return Err(exclusive(canonical, &owners.join(" or ")));
                }
            }
            return Ok(Verdict::Defer);
        }
        if stat.placement.category == Category::Pools && name == "Blood Pool" {
            return numeric(name, value, 0, GHOUL_BLOOD_POOL).map(Verdict::Accept);
        }
        if stat.placement.category != Category::Identity {
            return shared_rules(ctx, stat, value);
        }
        let Some(kind) = field_type(name) else {
            return shared_rules(ctx, stat, value);
        };
        if !ctx.state.is_kind(Archetype::MortalPlus, kind) {
            return Err(requires(name, &format!("Mortal+ Type {}", kind)));
        }
        match name {
            "Tribe" => {
                let tribes = tables::keyed(tables::TRIBES, "Garou")
                    .map(|tribes| tribes.iter().map(|(t, _)| *t).collect::<Vec<_>>())
                    .unwrap_or_default();
                enumerated("Garou tribe", value, tribes, &ctx.policy).map(Verdict::Accept)
            }
            "Kith" => enumerated(
                "kith",
                value,
                tables::KITHS.iter().map(|(k, _)| *k),
                &ctx.policy,
            )
            .map(Verdict::Accept),
            _ => Ok(Verdict::Defer),
        }
    }

    fn propagate(
        &self,
        store: &dyn AttributeStore,
        _state: &ArchetypeState,
        changed: &StatKey,
    ) -> Vec<DerivedUpdate> {
        if changed.category == Category::Virtues && changed.name == "Courage" {
            return self.willpower(store).into_iter().collect();
        }
        Vec::new()
    }

    fn recompute_all(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
    ) -> Vec<DerivedUpdate> {
        let computed: Vec<DerivedUpdate> = self.willpower(store).into_iter().collect();
        let mut updates = overlay(reseed_pools(store, state), computed);
        updates.extend(self.stale_fields(store, state));
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CharacterSheet;
    use crate::suggest::SuggestionPolicy;
    use crate::value_objects::Placement;

    fn mortal(kind: &str) -> CharacterSheet {
        let mut sheet = CharacterSheet::new();
        sheet.set_uniform(StatKey::splat(), StatValue::text("Mortal+"));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text(kind));
        sheet
    }

    fn validate(sheet: &CharacterSheet, stat: &ResolvedStat, value: &str) -> Result<Verdict, ValidationFailure> {
        let state = ArchetypeState::from_store(sheet);
        let ctx = RuleContext::new(sheet, &state, SuggestionPolicy::default());
        MortalPlusRules.validate(&ctx, stat, &StatValue::text(value))
    }

    fn lineage(name: &str) -> ResolvedStat {
        ResolvedStat::new(name, Placement::new(Category::Identity, subtype::LINEAGE))
    }

    #[test]
    fn type_fields_need_their_type() {
        let err = validate(&mortal("Psychic"), &lineage("Domitor"), "Marcus").unwrap_err();
        assert_eq!(err.message, "Domitor requires Mortal+ Type Ghoul.");
        assert_eq!(
            validate(&mortal("Ghoul"), &lineage("Domitor"), "Marcus"),
            Ok(Verdict::Defer)
        );
        assert!(validate(&mortal("Sorcerer"), &lineage("Fellowship"), "Hermetic Circle").is_ok());
    }

    #[test]
    fn kinfolk_tribe_is_a_garou_tribe() {
        assert_eq!(
            validate(&mortal("Kinfolk"), &lineage("Tribe"), "fianna"),
            Ok(Verdict::Accept(StatValue::text("Fianna")))
        );
        assert!(validate(&mortal("Kinfolk"), &lineage("Tribe"), "Bagheera").is_err());
    }

    #[test]
    fn kinfolk_gifts_follow_tribe_or_homid() {
        let gift = ResolvedStat::new("Persuasion", Placement::new(Category::Powers, subtype::GIFT));
        assert!(validate(&mortal("Kinfolk"), &gift, "1").is_ok());

        let razor = ResolvedStat::new("Razor Claws", Placement::new(Category::Powers, subtype::GIFT));
        assert!(validate(&mortal("Kinfolk"), &razor, "1").is_err());
    }

    #[test]
    fn type_change_reseeds_and_cleans_up() {
        let mut sheet = mortal("Ghoul");
        sheet.set_uniform(StatKey::lineage("Domitor"), StatValue::text("Marcus"));
        sheet.set_uniform(StatKey::pool("Blood Pool"), StatValue::Int(1));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text("Kinain"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = MortalPlusRules.recompute_all(&sheet, &state);
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::pool("Blood Pool"))));
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Banality"), 5)));
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::lineage("Domitor"))));
    }

    #[test]
    fn ghoul_blood_pool_is_bounded() {
        let pool = ResolvedStat::new("Blood Pool", Placement::new(Category::Pools, subtype::DUAL));
        assert_eq!(
            validate(&mortal("Ghoul"), &pool, "10"),
            Ok(Verdict::Accept(StatValue::Int(10)))
        );
        let err = validate(&mortal("Ghoul"), &pool, "11").unwrap_err();
        assert_eq!(err.message, "Blood Pool must be between 0 and 10, got 11.");
    }

    #[test]
    fn courage_sets_willpower() {
        let mut sheet = mortal("Faithful");
        sheet.set_uniform(StatKey::virtue("Courage"), StatValue::Int(4));
        let state = ArchetypeState::from_store(&sheet);
        assert_eq!(
            MortalPlusRules.propagate(&sheet, &state, &StatKey::virtue("Courage")),
            vec![DerivedUpdate::set(StatKey::pool("Willpower"), 4)]
        );
    }
}
