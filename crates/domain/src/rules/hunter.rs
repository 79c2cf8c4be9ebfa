//! Hunter rules: creed, creed-bound edges, primary virtue baseline.

use super::common::{exclusive, shared_rules};
use super::propagation::reseed_pools;
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::sheet::read_int;
use crate::tables;
use crate::value_objects::{subtype, Archetype, ArchetypeState, Category, StatKey, StatValue};

/// A creed's primary virtue starts at this value.
const PRIMARY_VIRTUE_BASELINE: i32 = 3;

fn primary_virtue(state: &ArchetypeState) -> Option<&'static str> {
    let creed = state.kind()?;
    tables::CREEDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(creed))
        .map(|(_, virtue)| *virtue)
}

pub struct HunterRules;

impl ArchetypeRules for HunterRules {
    fn archetype(&self) -> Archetype {
        Archetype::Hunter
    }

    fn check_access(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
    ) -> Result<(), ValidationFailure> {
        if stat.placement.subtype != subtype::EDGE {
            return Ok(());
        }
        let Some((canonical, creeds)) = tables::edge(&stat.name) else {
            return Ok(());
        };
        let held = ctx
            .state
            .kind()
            .is_some_and(|creed| creeds.iter().any(|c| c.eq_ignore_ascii_case(creed)));
        if held {
            return Ok(());
        }
        Err(exclusive(canonical, &creeds.join(" or ")))
    }

    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure> {
        shared_rules(ctx, stat, value)
    }

    fn propagate(
        &self,
        _store: &dyn AttributeStore,
        _state: &ArchetypeState,
        _changed: &StatKey,
    ) -> Vec<DerivedUpdate> {
        Vec::new()
    }

    fn recompute_all(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
    ) -> Vec<DerivedUpdate> {
        let mut updates = reseed_pools(store, state);
        if let Some(virtue) = primary_virtue(state) {
            let key = StatKey::virtue(virtue);
            if read_int(store, &key, 0) < PRIMARY_VIRTUE_BASELINE {
                updates.push(DerivedUpdate::set(key, PRIMARY_VIRTUE_BASELINE));
            }
        }
        updates
    }
}
