//! Changeling rules.

use super::common::{enumerated, requires, shared_rules};
use super::propagation::{overlay, reseed_pools, set_if_changed};
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::tables;
use crate::value_objects::{Archetype, ArchetypeState, Category, StatKey, StatValue};

const HOUSE_KITH: &str = "Sidhe";

fn kith_banality(state: &ArchetypeState) -> Option<i32> {
    let kith = state.kind()?;
    tables::KITHS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(kith))
        .map(|(_, banality)| *banality)
}

pub struct ChangelingRules;

impl ArchetypeRules for ChangelingRules {
    fn archetype(&self) -> Archetype {
        Archetype::Changeling
    }

    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        if stat.placement.category != Category::Identity {
            return shared_rules(ctx, stat, value);
        }
        let options: &[&str] = match stat.name.as_str() {
            "Seeming" => tables::SEEMINGS,
            "Court" => tables::COURTS,
            "Seelie Legacy" => tables::SEELIE_LEGACIES,
            "Unseelie Legacy" => tables::UNSEELIE_LEGACIES,
            "House" => {
                if !ctx.state.is_kind(Archetype::Changeling, HOUSE_KITH) {
                    return Err(requires("House", "Kith Sidhe"));
                }
                tables::HOUSES
            }
            _ => return shared_rules(ctx, stat, value),
        };
        let label = stat.name.to_lowercase();
        enumerated(&label, value, options.iter().copied(), &ctx.policy).map(Verdict::Accept)
    }

    fn propagate(
        &self,
        _store: &dyn AttributeStore,
        _state: &ArchetypeState,
        _changed: &StatKey,
    ) -> Vec<DerivedUpdate> {
        // Everything derived hangs off the kith, which triggers a full recompute.
        Vec::new()
    }

    fn recompute_all(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
    ) -> Vec<DerivedUpdate> {
        let computed: Vec<DerivedUpdate> = kith_banality(state)
            .and_then(|banality| set_if_changed(store, StatKey::pool("Banality"), banality))
            .into_iter()
            .collect();
        let mut updates = overlay(reseed_pools(store, state), computed);

        let house = StatKey::lineage("House");
        if store.contains(&house) && !state.is_kind(Archetype::Changeling, HOUSE_KITH) {
            updates.push(DerivedUpdate::remove(house));
        }
        updates
    }
}
