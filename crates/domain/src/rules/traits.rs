//! Archetype rule-set trait.
//!
//! Each splat implements this trait once; the registry dispatches on the
//! character's archetype and runs the shared checks around it.

use crate::error::ValidationFailure;
use crate::ports::AttributeStore;
use crate::resolver::ResolvedStat;
use crate::suggest::SuggestionPolicy;
use crate::value_objects::{Archetype, ArchetypeState, StatKey, StatValue};

/// What validation needs to know about the character being edited.
pub struct RuleContext<'a> {
    pub store: &'a dyn AttributeStore,
    pub state: &'a ArchetypeState,
    pub policy: SuggestionPolicy,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        store: &'a dyn AttributeStore,
        state: &'a ArchetypeState,
        policy: SuggestionPolicy,
    ) -> Self {
        Self {
            store,
            state,
            policy,
        }
    }

    /// Permanent integer at `key`, or `default`.
    pub fn int(&self, key: &StatKey, default: i32) -> i32 {
        crate::sheet::read_int(self.store, key, default)
    }
}

/// Outcome of a rule set's own validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The rule set checked the value; store this normalized value.
    Accept(StatValue),
    /// Not the rule set's concern; fall back to the shared value domains.
    Defer,
}

/// One derived-attribute change produced by propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedUpdate {
    /// Set both facets.
    Set { key: StatKey, value: StatValue },
    Remove { key: StatKey },
}

impl DerivedUpdate {
    pub fn set(key: StatKey, value: impl Into<StatValue>) -> Self {
        Self::Set {
            key,
            value: value.into(),
        }
    }

    pub fn remove(key: StatKey) -> Self {
        Self::Remove { key }
    }

    pub fn key(&self) -> &StatKey {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// Validation and propagation rules of one splat.
pub trait ArchetypeRules: Send + Sync {
    fn archetype(&self) -> Archetype;

    /// Splat-specific exclusivity checks, run for removals too.
    fn check_access(
        &self,
        _ctx: &RuleContext<'_>,
        _stat: &ResolvedStat,
    ) -> Result<(), ValidationFailure> {
        Ok(())
    }

    /// Validate a value the shared access checks already allowed.
    fn validate(
        &self,
        ctx: &RuleContext<'_>,
        stat: &ResolvedStat,
        value: &StatValue,
    ) -> Result<Verdict, ValidationFailure>;

    /// Derived updates caused by a write to `changed`.
    fn propagate(
        &self,
        store: &dyn AttributeStore,
        state: &ArchetypeState,
        changed: &StatKey,
    ) -> Vec<DerivedUpdate>;

    /// Every derived value of the splat, recomputed from scratch.
    fn recompute_all(&self, store: &dyn AttributeStore, state: &ArchetypeState)
        -> Vec<DerivedUpdate>;
}
