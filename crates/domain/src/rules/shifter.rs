//! Shifter rules: type-dependent breed, auspice, tribe and camp; gift
//! ownership; renown per type; pools seeded from breed, auspice and tribe.

use super::common::{enumerated, exclusive, requires, shared_rules};
use super::propagation::{overlay, reseed_pools, set_if_changed};
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::tables;
use crate::value_objects::{
    subtype, Archetype, ArchetypeState, Category, Placement, StatKey, StatValue,
};

fn renown_key(name: &str) -> StatKey {
    StatKey::new(Placement::new(Category::Advantages, subtype::RENOWN), name)
}

/// Breed, auspice or tribe entry of the character's type, if any.
fn lineage_entry<'t, T: Copy>(
    table: &'t [(&'static str, &'static [(&'static str, T)])],
    state: &ArchetypeState,
    field: &str,
) -> Option<T> {
    let kind = state.kind()?;
    let value = state.lineage(field)?;
    tables::keyed(table, kind)?
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, v)| *v)
}

/// Whether the stored `field` is listed for the character's type.
fn listed<T>(
    table: &[(&'static str, &'static [(&'static str, T)])],
    state: &ArchetypeState,
    field: &str,
) -> bool {
    let (Some(kind), Some(value)) = (state.kind(), state.lineage(field)) else {
        return false;
    };
    tables::keyed(table, kind)
        .is_some_and(|options| options.iter().any(|(name, _)| name.eq_ignore_ascii_case(value)))
}

pub struct ShifterRules;

impl ShifterRules {
    /// Breed, Auspice and Tribe values are listed per type.
    fn per_type<T>(
        &self,
        ctx: &RuleContext<'_>,
        field: &str,
        table: &[(&'static str, &'static [(&'static str, T)])],
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let Some(kind) = ctx.state.kind() else {
            return Err(requires(field, "a shifter Type"));
        };
        let Some(options) = tables::keyed(table, kind) else {
            return Err(ValidationFailure::new(format!(
                "{} characters have no {}.",
                kind,
                field.to_lowercase()
            )));
        };
        let label = format!("{} {}", kind, field.to_lowercase());
        enumerated(&label, value, options.iter().map(|(name, _)| *name), &ctx.policy)
            .map(Verdict::Accept)
    }

    fn camp(&self, ctx: &RuleContext<'_>, value: &StatValue) -> Result<Verdict, ValidationFailure> {
        let Some(tribe) = ctx.state.lineage("Tribe") else {
            return Err(requires("Camp", "a Tribe"));
        };
        match tables::keyed(tables::CAMPS, tribe) {
            Some(camps) => {
                let label = format!("{} camp", tribe);
                enumerated(&label, value, camps.iter().copied(), &ctx.policy).map(Verdict::Accept)
            }
            None => Ok(Verdict::Defer),
        }
    }

    fn check_gift(&self, ctx: &RuleContext<'_>, name: &str) -> Result<(), ValidationFailure> {
        match tables::gift(name) {
            Some((canonical, owners)) if !tables::gift_owned(owners, ctx.state) => {
                Err(exclusive(canonical, &owners.join(" or ")))
            }
            _ => Ok(()),
        }
    }

    fn renown_set(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Vec<DerivedUpdate> {
        let valid = state.kind().map(tables::renown_for).unwrap_or(&[]);
        let mut updates: Vec<DerivedUpdate> = store
            .keys()
            .into_iter()
            .filter(|k| k.category == Category::Advantages && k.subtype == subtype::RENOWN)
            .filter(|k| !valid.iter().any(|r| r.eq_ignore_ascii_case(&k.name)))
            .map(DerivedUpdate::remove)
            .collect();
        for renown in valid {
            let key = renown_key(renown);
            if !store.contains(&key) {
                updates.push(DerivedUpdate::set(key, 0));
            }
        }
        updates
    }

    /// Breed, Auspice and Tribe values the current type does not list. Each
    /// goes with the pool it seeded, which falls back to the type's baseline.
    fn stale_lineage(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Vec<DerivedUpdate> {
        let checks = [
            ("Breed", "Gnosis", listed(tables::BREEDS, state, "Breed")),
            ("Auspice", "Rage", listed(tables::AUSPICES, state, "Auspice")),
            ("Tribe", "Willpower", listed(tables::TRIBES, state, "Tribe")),
        ];
        let baselines = tables::pool_set(state);
        let mut updates = Vec::new();
        let mut tribe_dropped = false;

        for (field, pool, fits) in checks {
            if fits || state.lineage(field).is_none() {
                continue;
            }
            tribe_dropped |= field == "Tribe";
            updates.push(DerivedUpdate::remove(StatKey::lineage(field)));
            if let Some(seed) = baselines.iter().find(|s| s.name == pool) {
                updates.extend(set_if_changed(store, StatKey::pool(pool), seed.baseline));
            }
        }
        updates.extend(self.stale_camp(state, tribe_dropped));
        updates
    }

    /// Camp left without a tribe, or not among its tribe's camps.
    fn stale_camp(&self, state: &ArchetypeState, tribe_dropped: bool) -> Option<DerivedUpdate> {
        let camp = state.lineage("Camp")?;
        let fits = match state.lineage("Tribe") {
            Some(_) if tribe_dropped => false,
            Some(tribe) => tables::keyed(tables::CAMPS, tribe)
                .map_or(true, |camps| camps.iter().any(|c| c.eq_ignore_ascii_case(camp))),
            None => false,
        };
        (!fits).then(|| DerivedUpdate::remove(StatKey::lineage("Camp")))
    }

    fn gnosis(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Option<DerivedUpdate> {
        let gnosis = lineage_entry(tables::BREEDS, state, "Breed")?;
        set_if_changed(store, StatKey::pool("Gnosis"), gnosis)
    }

    fn rage(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Option<DerivedUpdate> {
        let rage = lineage_entry(tables::AUSPICES, state, "Auspice")??;
        set_if_changed(store, StatKey::pool("Rage"), rage)
    }

    fn willpower(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Option<DerivedUpdate> {
        let willpower = lineage_entry(tables::TRIBES, state, "Tribe")??;
        set_if_changed(store, StatKey::pool("Willpower"), willpower)
    }
}

impl ArchetypeRules for ShifterRules {
    fn archetype(&self) -> Archetype {
        Archetype::Shifter
    }

    fn check_access(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
    ) -> Result<(), ValidationFailure> {
        if stat.placement.category != Category::Advantages {
            return Ok(());
        }
        let Some(kind) = ctx.state.kind() else {
            return Err(requires(&stat.name, "a shifter Type"));
        };
        if tables::renown_for(kind)
            .iter()
            .any(|r| r.eq_ignore_ascii_case(&stat.name))
        {
            return Ok(());
        }
        Err(ValidationFailure::new(format!(
            "{} is not a renown of {} characters.",
            stat.name, kind
        )))
    }

    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let name = stat.name.as_str();
        match stat.placement.category {
            Category::Identity if name == "Breed" => {
                self.per_type(ctx, name, tables::BREEDS, value)
            }
            Category::Identity if name == "Auspice" => {
                self.per_type(ctx, name, tables::AUSPICES, value)
            }
            Category::Identity if name == "Tribe" => {
                self.per_type(ctx, name, tables::TRIBES, value)
            }
            Category::Identity if name == "Camp" => self.camp(ctx, value),
            Category::Powers if stat.placement.subtype == subtype::GIFT => {
                self.check_gift(ctx, name)?;
                Ok(Verdict::Defer)
            }
            _ => shared_rules(ctx, stat, value),
        }
    }

    fn propagate(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
        changed: &StatKey,
    ) -> Vec<DerivedUpdate> {
        if changed.category != Category::Identity {
            return Vec::new();
        }
        match changed.name.as_str() {
            "Breed" => self.gnosis(store, state).into_iter().collect(),
            "Auspice" => self.rage(store, state).into_iter().collect(),
            "Tribe" => self
                .willpower(store, state)
                .into_iter()
                .chain(self.stale_camp(state, false))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn recompute_all(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
    ) -> Vec<DerivedUpdate> {
        let mut computed: Vec<DerivedUpdate> = Vec::new();
        computed.extend(self.gnosis(store, state));
        computed.extend(self.rage(store, state));
        computed.extend(self.willpower(store, state));
        computed.extend(self.stale_lineage(store, state));
        let mut updates = overlay(reseed_pools(store, state), computed);
        updates.extend(self.renown_set(store, state));
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CharacterSheet;
    use crate::suggest::SuggestionPolicy;

    fn garou() -> CharacterSheet {
        let mut sheet = CharacterSheet::new();
        sheet.set_uniform(StatKey::splat(), StatValue::text("Shifter"));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text("Garou"));
        sheet
    }

    fn lineage(name: &str) -> ResolvedStat {
        ResolvedStat::new(name, Placement::new(Category::Identity, subtype::LINEAGE))
    }

    fn validate(sheet: &CharacterSheet, stat: &ResolvedStat, value: &str) -> Result<Verdict, ValidationFailure> {
        let state = ArchetypeState::from_store(sheet);
        let ctx = RuleContext::new(sheet, &state, SuggestionPolicy::default());
        ShifterRules.validate(&ctx, stat, &StatValue::text(value))
    }

    #[test]
    fn breed_needs_type_and_must_belong_to_it() {
        let mut untyped = CharacterSheet::new();
        untyped.set_uniform(StatKey::splat(), StatValue::text("Shifter"));
        let err = validate(&untyped, &lineage("Breed"), "Lupus").unwrap_err();
        assert_eq!(err.message, "Breed requires a shifter Type.");

        assert_eq!(
            validate(&garou(), &lineage("Breed"), "lupus"),
            Ok(Verdict::Accept(StatValue::text("Lupus")))
        );
        assert!(validate(&garou(), &lineage("Breed"), "Feline").is_err());
    }

    #[test]
    fn types_without_auspices_reject_them() {
        let mut corax = CharacterSheet::new();
        corax.set_uniform(StatKey::splat(), StatValue::text("Shifter"));
        corax.set_uniform(StatKey::lineage("Type"), StatValue::text("Corax"));
        let err = validate(&corax, &lineage("Auspice"), "Ahroun").unwrap_err();
        assert_eq!(err.message, "Corax characters have no auspice.");
    }

    #[test]
    fn camp_requires_tribe() {
        let err = validate(&garou(), &lineage("Camp"), "Grey Fleet").unwrap_err();
        assert_eq!(err.message, "Camp requires a Tribe.");

        let mut sheet = garou();
        sheet.set_uniform(StatKey::lineage("Tribe"), StatValue::text("Fianna"));
        assert_eq!(
            validate(&sheet, &lineage("Camp"), "grey fleet"),
            Ok(Verdict::Accept(StatValue::text("Grey Fleet")))
        );
    }

    #[test]
    fn gifts_need_an_owner() {
        let gift = ResolvedStat::new("Persuasion", Placement::new(Category::Powers, subtype::GIFT));
        assert!(validate(&garou(), &gift, "1").is_err());

        let mut sheet = garou();
        sheet.set_uniform(StatKey::lineage("Breed"), StatValue::text("Homid"));
        assert_eq!(validate(&sheet, &gift, "1"), Ok(Verdict::Defer));
    }

    #[test]
    fn renown_belongs_to_the_type() {
        let state = ArchetypeState::from_store(&garou());
        let sheet = garou();
        let ctx = RuleContext::new(&sheet, &state, SuggestionPolicy::default());
        let glory = ResolvedStat::new("Glory", Placement::new(Category::Advantages, subtype::RENOWN));
        let humor = ResolvedStat::new("Humor", Placement::new(Category::Advantages, subtype::RENOWN));
        assert!(ShifterRules.check_access(&ctx, &glory).is_ok());
        let err = ShifterRules.check_access(&ctx, &humor).unwrap_err();
        assert_eq!(err.message, "Humor is not a renown of Garou characters.");
    }

    #[test]
    fn lineage_choices_seed_pools() {
        let mut sheet = garou();
        sheet.set_uniform(StatKey::lineage("Breed"), StatValue::text("Lupus"));
        sheet.set_uniform(StatKey::lineage("Auspice"), StatValue::text("Ahroun"));
        sheet.set_uniform(StatKey::lineage("Tribe"), StatValue::text("Wendigo"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = ShifterRules.recompute_all(&sheet, &state);
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Gnosis"), 5)));
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Rage"), 5)));
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Willpower"), 4)));
        assert!(updates.contains(&DerivedUpdate::set(renown_key("Glory"), 0)));
        assert!(!updates.contains(&DerivedUpdate::set(StatKey::pool("Gnosis"), 1)));
    }

    #[test]
    fn type_change_drops_stale_renown_and_pools() {
        let mut sheet = garou();
        sheet.set_uniform(StatKey::pool("Rage"), StatValue::Int(3));
        sheet.set_uniform(renown_key("Glory"), StatValue::Int(2));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text("Nuwisha"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = ShifterRules.recompute_all(&sheet, &state);
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::pool("Rage"))));
        assert!(updates.contains(&DerivedUpdate::remove(renown_key("Glory"))));
        assert!(updates.contains(&DerivedUpdate::set(renown_key("Humor"), 0)));
    }

    #[test]
    fn type_change_drops_lineage_the_new_type_lacks() {
        let mut sheet = garou();
        for (field, value) in [
            ("Breed", "Lupus"),
            ("Auspice", "Ahroun"),
            ("Tribe", "Fianna"),
            ("Camp", "Grey Fleet"),
        ] {
            sheet.set_uniform(StatKey::lineage(field), StatValue::text(value));
        }
        sheet.set_uniform(StatKey::pool("Gnosis"), StatValue::Int(5));
        sheet.set_uniform(StatKey::pool("Rage"), StatValue::Int(5));
        sheet.set_uniform(StatKey::pool("Willpower"), StatValue::Int(3));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text("Corax"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = ShifterRules.recompute_all(&sheet, &state);
        for field in ["Breed", "Auspice", "Tribe", "Camp"] {
            assert!(
                updates.contains(&DerivedUpdate::remove(StatKey::lineage(field))),
                "{} kept",
                field
            );
        }
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Gnosis"), 1)));
        assert!(updates.contains(&DerivedUpdate::set(StatKey::pool("Rage"), 1)));
        assert!(!updates.iter().any(|u| u.key() == &StatKey::pool("Willpower")));
    }

    #[test]
    fn shared_breeds_survive_a_type_change() {
        let mut sheet = garou();
        sheet.set_uniform(StatKey::lineage("Breed"), StatValue::text("Homid"));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text("Corax"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = ShifterRules.recompute_all(&sheet, &state);
        assert!(!updates.contains(&DerivedUpdate::remove(StatKey::lineage("Breed"))));
    }

    #[test]
    fn tribe_change_drops_a_foreign_camp() {
        let mut sheet = garou();
        sheet.set_uniform(StatKey::lineage("Tribe"), StatValue::text("Get of Fenris"));
        sheet.set_uniform(StatKey::lineage("Camp"), StatValue::text("Grey Fleet"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = ShifterRules.propagate(&sheet, &state, &StatKey::lineage("Tribe"));
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::lineage("Camp"))));
    }
}
