//! Mage rules: affiliation-dependent faction fields, sphere naming per
//! affiliation, spheres capped by Arete, Quintessence from Avatar.

use super::common::{enumerated, exclusive, numeric, requires, shared_rules};
use super::propagation::{overlay, pool_key, reseed_pools, set_if_changed};
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::sheet::read_int;
use crate::tables;
use crate::value_objects::{subtype, Archetype, ArchetypeState, Category, StatKey, StatValue};

const TRADITIONS: &str = "Traditions";
const TECHNOCRACY: &str = "Technocracy";
const DISPARATES: &str = "Disparates";

/// Faction fields and the affiliation each belongs to.
const FACTION_FIELDS: &[(&str, &str)] = &[
    ("Tradition", TRADITIONS),
    ("Tradition Subfaction", TRADITIONS),
    ("Convention", TECHNOCRACY),
    ("Methodology", TECHNOCRACY),
    ("Craft", DISPARATES),
];

fn is_technocracy(state: &ArchetypeState) -> bool {
    state.is_kind(Archetype::Mage, TECHNOCRACY)
}

/// Sphere names a mage of this affiliation uses.
fn sphere_names(state: &ArchetypeState) -> Vec<&'static str> {
    if is_technocracy(state) {
        tables::SPHERES
            .iter()
            .map(|sphere| {
                tables::TECHNOCRACY_SPHERES
                    .iter()
                    .find(|(_, replaced)| replaced == sphere)
                    .map(|(name, _)| *name)
                    .unwrap_or(*sphere)
            })
            .collect()
    } else {
        tables::SPHERES.to_vec()
    }
}

fn requires_affiliation(field: &str, affiliation: &str) -> ValidationFailure {
    requires(field, &format!("Affiliation {}", affiliation))
}

pub struct MageRules;

impl MageRules {
    fn faction(
        &self,
        ctx: &RuleContext<'_>,
        field: &str,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let state = ctx.state;
        let accept = |label: &str, options: Vec<&'static str>| {
            enumerated(label, value, options, &ctx.policy).map(Verdict::Accept)
        };
        match field {
            "Tradition" => {
                if !state.is_kind(Archetype::Mage, TRADITIONS) {
                    return Err(requires_affiliation(field, TRADITIONS));
                }
                accept("tradition", tables::TRADITIONS.iter().map(|(t, _)| *t).collect())
            }
            "Tradition Subfaction" => {
                let Some(tradition) = state.lineage("Tradition") else {
                    return Err(requires(field, "a Tradition"));
                };
                match tables::keyed(tables::TRADITIONS, tradition) {
                    Some(subfactions) if !subfactions.is_empty() => {
                        accept(&format!("{} subfaction", tradition), subfactions.to_vec())
                    }
                    _ => Ok(Verdict::Defer),
                }
            }
            "Convention" => {
                if !is_technocracy(state) {
                    return Err(requires_affiliation(field, TECHNOCRACY));
                }
                accept("convention", tables::CONVENTIONS.iter().map(|(c, _)| *c).collect())
            }
            "Methodology" => {
                let Some(convention) = state.lineage("Convention") else {
                    return Err(requires(field, "a Convention"));
                };
                match tables::keyed(tables::CONVENTIONS, convention) {
                    Some(methodologies) => {
                        accept(&format!("{} methodology", convention), methodologies.to_vec())
                    }
                    None => Ok(Verdict::Defer),
                }
            }
            "Craft" => {
                if !state.is_kind(Archetype::Mage, DISPARATES) {
                    return Err(requires_affiliation(field, DISPARATES));
                }
                accept("craft", tables::CRAFTS.to_vec())
            }
            _ => Ok(Verdict::Defer),
        }
    }

    fn sphere_rating(
        &self,
        ctx: &RuleContext<'_>,
        name: &str,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let rating = numeric(name, value, 0, 5)?;
        let arete = pool_key("Arete").map(|k| ctx.int(&k, 1)).unwrap_or(1);
        if rating.as_int().is_some_and(|n| n > arete) {
            return Err(ValidationFailure::new(format!(
                "{} cannot exceed Arete ({}).",
                name, arete
            )));
        }
        Ok(Verdict::Accept(rating))
    }

    /// Faction fields left over from another affiliation, tradition or convention.
    fn stale_identity(&self, store: &dyn AttributeStore, state: &ArchetypeState) -> Vec<DerivedUpdate> {
        let affiliation = state.kind();
        let mut updates = Vec::new();
        for (field, owner) in FACTION_FIELDS {
            let key = StatKey::lineage(*field);
            if !store.contains(&key) {
                continue;
            }
            let parent_matches = affiliation.is_some_and(|a| a.eq_ignore_ascii_case(owner));
            let child_matches = match *field {
                "Tradition Subfaction" => subfaction_fits(state, "Tradition", tables::TRADITIONS),
                "Methodology" => subfaction_fits(state, "Convention", tables::CONVENTIONS),
                _ => true,
            };
            if !parent_matches || !child_matches {
                updates.push(DerivedUpdate::remove(key));
            }
        }

        let affinity = StatKey::lineage("Affinity Sphere");
        if let Some(sphere) = state.lineage("Affinity Sphere") {
            if !sphere_names(state).iter().any(|s| s.eq_ignore_ascii_case(sphere)) {
                updates.push(DerivedUpdate::remove(affinity));
            }
        }
        updates
    }

    fn quintessence(&self, store: &dyn AttributeStore) -> Option<DerivedUpdate> {
        let avatar = read_int(store, &StatKey::background("Avatar"), 0);
        set_if_changed(store, StatKey::pool("Quintessence"), avatar)
    }
}

/// Whether the stored child value still belongs to its parent, when the
/// parent lists its children.
fn subfaction_fits(
    state: &ArchetypeState,
    parent_field: &str,
    table: &[(&'static str, &'static [&'static str])],
) -> bool {
    let child_field = if parent_field == "Tradition" {
        "Tradition Subfaction"
    } else {
        "Methodology"
    };
    let Some(parent) = state.lineage(parent_field) else {
        return false;
    };
    let Some(child) = state.lineage(child_field) else {
        return true;
    };
    match tables::keyed(table, parent) {
        Some(children) if !children.is_empty() => {
            children.iter().any(|c| c.eq_ignore_ascii_case(child))
        }
        _ => true,
    }
}

impl ArchetypeRules for MageRules {
    fn archetype(&self) -> Archetype {
        Archetype::Mage
    }

    fn check_access(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
    ) -> Result<(), ValidationFailure> {
        if stat.placement.subtype != subtype::SPHERE {
            return Ok(());
        }
        let technocratic = tables::TECHNOCRACY_SPHERES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&stat.name));
        let replaced = tables::TECHNOCRACY_SPHERES
            .iter()
            .find(|(_, sphere)| sphere.eq_ignore_ascii_case(&stat.name));
        match (is_technocracy(ctx.state), technocratic, replaced) {
            (false, Some((name, _)), _) => Err(exclusive(name, TECHNOCRACY)),
            (true, _, Some((name, sphere))) => Err(ValidationFailure::new(format!(
                "Technocracy characters use {} instead of {}.",
                name, sphere
            ))),
            _ => Ok(()),
        }
    }

    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let name = stat.name.as_str();
        match stat.placement.category {
            Category::Identity if FACTION_FIELDS.iter().any(|(f, _)| *f == name) => {
                self.faction(ctx, name, value)
            }
            Category::Identity if name == "Essence" => {
                enumerated("essence", value, tables::ESSENCES.iter().copied(), &ctx.policy)
                    .map(Verdict::Accept)
            }
            Category::Identity if name == "Affinity Sphere" => {
                enumerated("sphere", value, sphere_names(ctx.state), &ctx.policy)
                    .map(Verdict::Accept)
            }
            Category::Powers if stat.placement.subtype == subtype::SPHERE => {
                self.sphere_rating(ctx, name, value)
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
        match (changed.category, changed.name.as_str()) {
            (Category::Backgrounds, "Avatar") => self.quintessence(store).into_iter().collect(),
            (Category::Identity, "Tradition" | "Convention") => self.stale_identity(store, state),
            _ => Vec::new(),
        }
    }

    fn recompute_all(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
    ) -> Vec<DerivedUpdate> {
        let computed: Vec<DerivedUpdate> = self.quintessence(store).into_iter().collect();
        let mut updates = overlay(reseed_pools(store, state), computed);
        updates.extend(self.stale_identity(store, state));
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CharacterSheet;
    use crate::suggest::SuggestionPolicy;
    use crate::value_objects::Placement;

    fn mage(affiliation: &str) -> CharacterSheet {
        let mut sheet = CharacterSheet::new();
        sheet.set_uniform(StatKey::splat(), StatValue::text("Mage"));
        sheet.set_uniform(StatKey::lineage("Affiliation"), StatValue::text(affiliation));
        sheet
    }

    fn lineage(name: &str) -> ResolvedStat {
        ResolvedStat::new(name, Placement::new(Category::Identity, subtype::LINEAGE))
    }

    fn sphere(name: &str) -> ResolvedStat {
        ResolvedStat::new(name, Placement::new(Category::Powers, subtype::SPHERE))
    }

    fn validate(sheet: &CharacterSheet, stat: &ResolvedStat, value: StatValue) -> Result<Verdict, ValidationFailure> {
        let state = ArchetypeState::from_store(sheet);
        let ctx = RuleContext::new(sheet, &state, SuggestionPolicy::default());
        MageRules.validate(&ctx, stat, &value)
    }

    fn access(sheet: &CharacterSheet, stat: &ResolvedStat) -> Result<(), ValidationFailure> {
        let state = ArchetypeState::from_store(sheet);
        let ctx = RuleContext::new(sheet, &state, SuggestionPolicy::default());
        MageRules.check_access(&ctx, stat)
    }

    #[test]
    fn tradition_requires_traditions_affiliation() {
        let err = validate(&mage("Technocracy"), &lineage("Tradition"), StatValue::text("Verbena"))
            .unwrap_err();
        assert_eq!(err.message, "Tradition requires Affiliation Traditions.");
        assert_eq!(
            validate(&mage("Traditions"), &lineage("Tradition"), StatValue::text("verbena")),
            Ok(Verdict::Accept(StatValue::text("Verbena")))
        );
    }

    #[test]
    fn subfaction_follows_its_tradition() {
        let mut sheet = mage("Traditions");
        let err = validate(&sheet, &lineage("Tradition Subfaction"), StatValue::text("Lifeweavers"))
            .unwrap_err();
        assert_eq!(err.message, "Tradition Subfaction requires a Tradition.");

        sheet.set_uniform(StatKey::lineage("Tradition"), StatValue::text("Verbena"));
        assert!(validate(&sheet, &lineage("Tradition Subfaction"), StatValue::text("Lifeweavers")).is_ok());
        assert!(validate(&sheet, &lineage("Tradition Subfaction"), StatValue::text("Cybernauts")).is_err());

        sheet.set_uniform(StatKey::lineage("Tradition"), StatValue::text("Hollow Ones"));
        assert_eq!(
            validate(&sheet, &lineage("Tradition Subfaction"), StatValue::text("Goth Kids")),
            Ok(Verdict::Defer)
        );
    }

    #[test]
    fn methodology_requires_convention() {
        let mut sheet = mage("Technocracy");
        assert!(validate(&sheet, &lineage("Methodology"), StatValue::text("Genegineers")).is_err());
        sheet.set_uniform(StatKey::lineage("Convention"), StatValue::text("Progenitors"));
        assert!(validate(&sheet, &lineage("Methodology"), StatValue::text("Genegineers")).is_ok());
    }

    #[test]
    fn sphere_names_follow_affiliation() {
        let err = access(&mage("Traditions"), &sphere("Data")).unwrap_err();
        assert_eq!(err.message, "Data is only available to Technocracy characters.");

        let err = access(&mage("Technocracy"), &sphere("Prime")).unwrap_err();
        assert_eq!(err.message, "Technocracy characters use Primal Utility instead of Prime.");

        assert!(access(&mage("Technocracy"), &sphere("Forces")).is_ok());
    }

    #[test]
    fn spheres_cannot_exceed_arete() {
        let mut sheet = mage("Traditions");
        sheet.set_uniform(StatKey::new(Placement::new(Category::Pools, subtype::ADVANTAGE), "Arete"), StatValue::Int(2));
        assert!(validate(&sheet, &sphere("Forces"), StatValue::Int(2)).is_ok());
        let err = validate(&sheet, &sphere("Forces"), StatValue::Int(3)).unwrap_err();
        assert_eq!(err.message, "Forces cannot exceed Arete (2).");
    }

    #[test]
    fn affiliation_change_drops_stale_faction_fields() {
        let mut sheet = mage("Technocracy");
        sheet.set_uniform(StatKey::lineage("Tradition"), StatValue::text("Verbena"));
        sheet.set_uniform(StatKey::lineage("Convention"), StatValue::text("Syndicate"));
        sheet.set_uniform(StatKey::lineage("Affinity Sphere"), StatValue::text("Prime"));
        let state = ArchetypeState::from_store(&sheet);

        let updates = MageRules.recompute_all(&sheet, &state);
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::lineage("Tradition"))));
        assert!(updates.contains(&DerivedUpdate::remove(StatKey::lineage("Affinity Sphere"))));
        assert!(!updates.iter().any(|u| u.key() == &StatKey::lineage("Convention")));
    }

    #[test]
    fn avatar_sets_quintessence() {
        let mut sheet = mage("Traditions");
        sheet.set_uniform(StatKey::background("Avatar"), StatValue::Int(3));
        let state = ArchetypeState::from_store(&sheet);
        assert_eq!(
            MageRules.propagate(&sheet, &state, &StatKey::background("Avatar")),
            vec![DerivedUpdate::set(StatKey::pool("Quintessence"), 3)]
        );
    }
}
