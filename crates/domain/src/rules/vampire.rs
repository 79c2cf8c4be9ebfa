//! Vampire rules: clan, sect and path; path-bound virtues; blood pool by
//! generation.

use super::common::{enumerated, numeric, requires, shared_rules};
use super::propagation::{overlay, pool_key, reseed_pools, set_if_changed};
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::sheet::{read_int, read_text};
use crate::tables::{self, VirtuePair};
use crate::value_objects::{
    subtype, Archetype, ArchetypeState, Category, Placement, StatKey, StatValue,
};

const PATH_FIELD: &str = "Path of Enlightenment";
const DEFAULT_PATH: &str = "Humanity";

/// Blood pool maximum per Generation background dot.
const GENERATION_BLOOD_POOL: [i32; 6] = [10, 11, 12, 13, 14, 15];

/// Virtues that depend on the path.
const PATH_VIRTUES: &[&str] = &["Conscience", "Conviction", "Self-Control", "Instinct"];

fn generation_key() -> StatKey {
    StatKey::background("Generation")
}

fn discipline_key(name: &str) -> StatKey {
    StatKey::new(Placement::new(Category::Powers, subtype::DISCIPLINE), name)
}

/// Blood pool maximum for the stored Generation (missing counts as 0).
pub fn blood_pool_max(store: &dyn AttributeStore) -> i32 {
    let dots = read_int(store, &generation_key(), 0).clamp(0, 5);
    GENERATION_BLOOD_POOL[dots as usize]
}

fn current_pair(store: &dyn AttributeStore) -> VirtuePair {
    read_text(store, &StatKey::lineage(PATH_FIELD))
        .and_then(|path| tables::path_pair(&path))
        .unwrap_or(VirtuePair::Conscience)
}

pub struct VampireRules;

impl VampireRules {
    fn check_virtue(&self, ctx: &RuleContext<'_>, name: &str) -> Result<(), ValidationFailure> {
        if !PATH_VIRTUES.contains(&name) {
            return Ok(());
        }
        let pair = current_pair(ctx.store);
        if pair.virtues().contains(&name) {
            return Ok(());
        }
        let path = read_text(ctx.store, &StatKey::lineage(PATH_FIELD))
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        let [first, second] = pair.virtues();
        Err(ValidationFailure::new(format!(
            "{} uses {} and {}, not {}.",
            path, first, second, name
        )))
    }

    fn check_path_power(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
    ) -> Result<(), ValidationFailure> {
        let discipline = match stat.placement.subtype {
            subtype::THAUMATURGY => "Thaumaturgy",
            subtype::NECROMANCY => "Necromancy",
            _ => return Ok(()),
        };
        if ctx.int(&discipline_key(discipline), 0) < 1 {
            return Err(requires(
                &stat.name,
                &format!("{} 1 or higher", discipline),
            ));
        }
        Ok(())
    }

    fn virtue_swap(&self, store: &dyn AttributeStore) -> Vec<DerivedUpdate> {
        let pair = current_pair(store).virtues();
        let mut updates = Vec::new();
        for virtue in PATH_VIRTUES {
            let key = StatKey::virtue(*virtue);
            let wanted = pair.contains(virtue);
            match (wanted, store.contains(&key)) {
                (false, true) => updates.push(DerivedUpdate::remove(key)),
                (true, false) => updates.push(DerivedUpdate::set(key, 1)),
                _ => {}
            }
        }
        updates
    }

    fn path_rating(&self, store: &dyn AttributeStore) -> Option<DerivedUpdate> {
        let rating: i32 = current_pair(store)
            .virtues()
            .iter()
            .map(|v| read_int(store, &StatKey::virtue(*v), 1))
            .sum();
        set_if_changed(store, pool_key("Path Rating")?, rating)
    }

    fn blood_pool(&self, store: &dyn AttributeStore) -> Option<DerivedUpdate> {
        set_if_changed(store, StatKey::pool("Blood Pool"), blood_pool_max(store))
    }

    fn willpower(&self, store: &dyn AttributeStore) -> Option<DerivedUpdate> {
        let courage = read_int(store, &StatKey::virtue("Courage"), 1);
        set_if_changed(store, StatKey::pool("Willpower"), courage)
    }
}

impl ArchetypeRules for VampireRules {
    fn archetype(&self) -> Archetype {
        Archetype::Vampire
    }

    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        let name = stat.name.as_str();
        match stat.placement.category {
            Category::Identity if name == "Sect" => {
                enumerated("sect", value, tables::SECTS.iter().copied(), &ctx.policy)
                    .map(Verdict::Accept)
            }
            Category::Identity if name == PATH_FIELD => enumerated(
                "path of enlightenment",
                value,
                tables::PATHS.iter().map(|(p, _)| *p),
                &ctx.policy,
            )
            .map(Verdict::Accept),
            Category::Virtues => {
                self.check_virtue(ctx, name)?;
                Ok(Verdict::Defer)
            }
            Category::Powers => {
                self.check_path_power(ctx, stat)?;
                Ok(Verdict::Defer)
            }
            Category::Pools if name == "Blood Pool" => {
                numeric(name, value, 0, blood_pool_max(ctx.store)).map(Verdict::Accept)
            }
            _ => shared_rules(ctx, stat, value),
        }
    }

    fn propagate(
        &self,
        store: &dyn AttributeStore,
        _state: &ArchetypeState,
        changed: &StatKey,
    ) -> Vec<DerivedUpdate> {
        let mut updates = Vec::new();
        match changed.category {
            Category::Backgrounds if changed.name == "Generation" => {
                updates.extend(self.blood_pool(store));
            }
            Category::Identity if changed.name == PATH_FIELD => {
                updates.extend(self.virtue_swap(store));
                // Swapped-in virtues start at 1, the same default the rating uses.
                updates.extend(self.path_rating(store));
            }
            Category::Virtues => {
                updates.extend(self.path_rating(store));
                if changed.name == "Courage" {
                    updates.extend(self.willpower(store));
                }
            }
            _ => {}
        }
        updates
    }

    fn recompute_all(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
    ) -> Vec<DerivedUpdate> {
        let mut computed = self.virtue_swap(store);
        computed.extend(self.blood_pool(store));
        computed.extend(self.path_rating(store));
        computed.extend(self.willpower(store));
        overlay(reseed_pools(store, state), computed)
    }
}
