//! Possessed rules. Blessings and charms are gated by type in the shared
//! access tables; the type decides the pool set.

use super::common::shared_rules;
use super::propagation::reseed_pools;
use super::traits::{ArchetypeRules, DerivedUpdate, RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::value_objects::{Archetype, ArchetypeState, StatKey, StatValue};

pub struct PossessedRules;

impl ArchetypeRules for PossessedRules {
    fn archetype(&self) -> Archetype {
        Archetype::Possessed
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
        reseed_pools(store, state)
    }
}
