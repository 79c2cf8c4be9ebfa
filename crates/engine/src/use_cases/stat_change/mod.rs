//! Stat change use case.
//!
//! Runs one write cycle for one character: parse the identifier, resolve its
//! slot, validate the value against the character's splat, write both facets,
//! propagate derived values and report. A failure ends the cycle before the
//! write, so a rejected change leaves the sheet untouched.

mod error;


pub use error::{InstancingError, StatChangeError};

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use darkroster_domain::{
    read_int, Archetype, ArchetypeInitializer, ArchetypeState, AttributeStore, Category,
    DerivedUpdate, Instancing, Placement, Resolution, ResolvedStat, RulesRegistry, StatCatalog,
    StatDefinition, StatKey, StatParser, StatResolver, StatToken, StatValue, ValidationFailure,
};

// =============================================================================
// Result Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeStatus {
    Ok,
    Error,
}

/// Result of `apply`: always a structured outcome, never an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatChangeOutcome {
    pub status: OutcomeStatus,
    /// One explanatory line for the user.
    pub message: String,
    /// Where the value was written, on success.
    pub written_key: Option<StatKey>,
    /// Derived values recomputed after the write.
    pub derived: Vec<DerivedUpdate>,
}

impl StatChangeOutcome {
    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }
}

impl From<Result<StatChangeReport, StatChangeError>> for StatChangeOutcome {
    fn from(result: Result<StatChangeReport, StatChangeError>) -> Self {
        match result {
            Ok(report) => Self {
                status: OutcomeStatus::Ok,
                message: report.to_string(),
                written_key: Some(report.key),
                derived: report.derived,
            },
            Err(e) => Self {
                status: OutcomeStatus::Error,
                message: e.to_string(),
                written_key: None,
                derived: Vec::new(),
            },
        }
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct StatChangeReport {
    pub key: StatKey,
    /// The stored value; `None` for a removal.
    pub value: Option<StatValue>,
    pub derived: Vec<DerivedUpdate>,
}

impl fmt::Display for StatChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} set to {}.", self.key.name, value)?,
            None => write!(f, "{} removed.", self.key.name)?,
        }
        if !self.derived.is_empty() {
            let changes: Vec<String> = self
                .derived
                .iter()
                .map(|update| match update {
                    DerivedUpdate::Set { key, value } => format!("{} {}", key.name, value),
                    DerivedUpdate::Remove { key } => format!("{} removed", key.name),
                })
                .collect();
            write!(f, " Also updated: {}.", changes.join(", "))?;
        }
        Ok(())
    }
}

/// One requested change for `apply_many`.
#[derive(Debug, Clone)]
pub struct StatChange {
    pub token: String,
    pub value: String,
}

impl StatChange {
    pub fn new(token: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Write cycle
// =============================================================================

/// The value half of a request, before it is resolved against the sheet.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Absolute(StatValue),
    /// `+N` / `-N`, relative to the current permanent value.
    Relative(i32),
    Clear,
}

impl RawValue {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Clear;
        }
        if let Some(sign) = raw.chars().next().filter(|c| *c == '+' || *c == '-') {
            let digits = raw[1..].trim();
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(n) = digits.parse::<i32>() {
                    return Self::Relative(if sign == '-' { -n } else { n });
                }
            }
        }
        match raw.parse::<i32>() {
            Ok(n) => Self::Absolute(StatValue::Int(n)),
            Err(_) => Self::Absolute(StatValue::text(raw)),
        }
    }

    /// Absolute value to validate, or `None` for a removal.
    fn resolve(
        self,
        store: &dyn AttributeStore,
        key: &StatKey,
    ) -> Result<Option<StatValue>, ValidationFailure> {
        match self {
            Self::Absolute(value) => Ok(Some(value)),
            Self::Relative(delta) => read_int(store, key, 0)
                .checked_add(delta)
                .map(|n| Some(StatValue::Int(n)))
                .ok_or_else(|| {
                    ValidationFailure::new(format!("{:+} to {} is out of range.", delta, key.name))
                }),
            Self::Clear => Ok(None),
        }
    }
}

/// A resolved write awaiting validation.
struct PendingWrite {
    stat: ResolvedStat,
    key: StatKey,
    value: Option<StatValue>,
    definition: Option<StatDefinition>,
}

/// States of one write cycle. Every failure jumps straight to `Report`.
enum CycleState {
    Parse {
        raw_token: String,
        raw_value: String,
    },
    Resolve {
        token: StatToken,
        value: RawValue,
    },
    Validate(PendingWrite),
    Write {
        key: StatKey,
        value: Option<StatValue>,
        reinitialize: Option<Archetype>,
    },
    Propagate {
        key: StatKey,
        value: Option<StatValue>,
    },
    Report(Result<StatChangeReport, StatChangeError>),
}

// =============================================================================
// Use Case
// =============================================================================

/// Applies stat changes to a character sheet.
pub struct StatChangeUseCase {
    catalog: Arc<dyn StatCatalog>,
    initializer: Arc<dyn ArchetypeInitializer>,
    parser: StatParser,
    resolver: StatResolver,
    registry: RulesRegistry,
}

impl StatChangeUseCase {
    pub fn new(
        catalog: Arc<dyn StatCatalog>,
        initializer: Arc<dyn ArchetypeInitializer>,
        registry: RulesRegistry,
    ) -> Self {
        Self {
            parser: StatParser::new(catalog.clone()),
            resolver: StatResolver::new(catalog.clone()),
            catalog,
            initializer,
            registry,
        }
    }

    pub fn registry(&self) -> &RulesRegistry {
        &self.registry
    }

    /// Apply one change and report the outcome. Never fails; a rejected
    /// change comes back with `OutcomeStatus::Error` and leaves `store` as it was.
    pub fn apply(
        &self,
        store: &mut dyn AttributeStore,
        raw_token: &str,
        raw_value: &str,
    ) -> StatChangeOutcome {
        let result = self.try_apply(store, raw_token, raw_value);
        if let Err(e) = &result {
            tracing::debug!(token = raw_token.trim(), error = %e, "Stat change rejected");
        }
        result.into()
    }

    /// Apply changes in order, each against the sheet as the previous one left it.
    pub fn apply_many(
        &self,
        store: &mut dyn AttributeStore,
        changes: &[StatChange],
    ) -> Vec<StatChangeOutcome> {
        changes
            .iter()
            .map(|change| self.apply(store, &change.token, &change.value))
            .collect()
    }

    pub fn try_apply(
        &self,
        store: &mut dyn AttributeStore,
        raw_token: &str,
        raw_value: &str,
    ) -> Result<StatChangeReport, StatChangeError> {
        let mut state = CycleState::Parse {
            raw_token: raw_token.to_string(),
            raw_value: raw_value.to_string(),
        };
        loop {
            state = match state {
                CycleState::Report(result) => return result,
                other => self.step(store, other).unwrap_or_else(|e| CycleState::Report(Err(e))),
            };
        }
    }

    fn step(
        &self,
        store: &mut dyn AttributeStore,
        state: CycleState,
    ) -> Result<CycleState, StatChangeError> {
        match state {
            CycleState::Parse {
                raw_token,
                raw_value,
            } => Ok(CycleState::Resolve {
                token: self.parser.parse(&raw_token)?,
                value: RawValue::parse(&raw_value),
            }),
            CycleState::Resolve { token, value } => {
                let pending = if token.is_specialty() {
                    self.resolve_specialty(&*store, &token)?
                } else {
                    self.resolve(&*store, &token, value)?
                };
                Ok(CycleState::Validate(pending))
            }
            CycleState::Validate(pending) => self.validate(&*store, pending),
            CycleState::Write {
                key,
                value,
                reinitialize,
            } => {
                match (&value, reinitialize) {
                    (_, Some(archetype)) => {
                        tracing::info!(archetype = %archetype, "Initializing archetype");
                        self.initializer.initialize_archetype(store, archetype, None);
                    }
                    (Some(v), None) => {
                        tracing::debug!(key = %key, value = %v, "Writing stat");
                        store.set_both(key.clone(), v.clone());
                    }
                    (None, None) => {
                        tracing::debug!(key = %key, "Removing stat");
                        store.remove(&key);
                    }
                }
                Ok(CycleState::Propagate { key, value })
            }
            CycleState::Propagate { key, value } => {
                let derived = self.registry.propagate(store, &key);
                Ok(CycleState::Report(Ok(StatChangeReport {
                    key,
                    value,
                    derived,
                })))
            }
            report @ CycleState::Report(_) => Ok(report),
        }
    }

    fn resolve(
        &self,
        store: &dyn AttributeStore,
        token: &StatToken,
        value: RawValue,
    ) -> Result<PendingWrite, StatChangeError> {
        let state = ArchetypeState::from_store(store);
        let stat = self.place(token, &state)?;
        let definition = self.definition(&stat.name);

        let instancing = definition
            .as_ref()
            .map(|d| d.instancing)
            .or(token.instancing)
            .unwrap_or_default();
        match (instancing, token.qualifier.is_some()) {
            (Instancing::Required, false) => {
                return Err(InstancingError::QualifierRequired { name: stat.name }.into())
            }
            (Instancing::Forbidden, true) => {
                return Err(InstancingError::QualifierForbidden { name: stat.name }.into())
            }
            _ => {}
        }

        let key = stat.key(token.storage_name(&stat.name));
        let value = value.resolve(store, &key)?;
        Ok(PendingWrite {
            stat,
            key,
            value,
            definition,
        })
    }

    /// Specialties hang off an existing attribute or ability. `Melee[Knives]`
    /// sets the specialty, `Melee[]` removes it.
    fn resolve_specialty(
        &self,
        store: &dyn AttributeStore,
        token: &StatToken,
    ) -> Result<PendingWrite, StatChangeError> {
        let state = ArchetypeState::from_store(store);
        let parent = self.place(&StatToken::bare(token.name.clone()), &state)?;

        let subtype = Category::Specialties
            .find_subtype(parent.placement.category.as_str())
            .ok_or_else(|| {
                ValidationFailure::new(format!(
                    "Specialties can only be added to attributes and abilities, not {}.",
                    parent.placement.category
                ))
            })?;
        if !store.contains(&parent.key(parent.name.clone())) {
            return Err(StatChangeError::not_found(parent.name));
        }

        let stat = ResolvedStat::new(
            parent.name.clone(),
            Placement::new(Category::Specialties, subtype),
        );
        let key = stat.key(parent.name);
        let value = token
            .specialty
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(StatValue::text);
        Ok(PendingWrite {
            stat,
            key,
            value,
            definition: None,
        })
    }

    fn place(
        &self,
        token: &StatToken,
        state: &ArchetypeState,
    ) -> Result<ResolvedStat, StatChangeError> {
        match self.resolver.resolve(token, state) {
            Resolution::Placed(stat) => Ok(stat),
            Resolution::Unverified { name, .. } => {
                let suggestions = self.resolver.suggestions(&name, &self.registry.policy());
                Err(StatChangeError::resolution(name, suggestions))
            }
            Resolution::Unresolved => {
                let suggestions = self
                    .resolver
                    .suggestions(&token.name, &self.registry.policy());
                if suggestions.is_empty() {
                    Err(StatChangeError::not_found(token.name.clone()))
                } else {
                    Err(StatChangeError::resolution(token.name.clone(), suggestions))
                }
            }
        }
    }

    fn validate(
        &self,
        store: &dyn AttributeStore,
        pending: PendingWrite,
    ) -> Result<CycleState, StatChangeError> {
        let value = self.registry.validate(
            store,
            &pending.stat,
            pending.value.as_ref(),
            pending.definition.as_ref(),
        )?;

        let reinitialize = if pending.key == StatKey::splat() {
            let archetype = value
                .as_ref()
                .and_then(StatValue::as_text)
                .and_then(|s| s.parse::<Archetype>().ok())
                .ok_or_else(|| ValidationFailure::new("The splat could not be read."))?;
            Some(archetype)
        } else {
            None
        };

        Ok(CycleState::Write {
            key: pending.key,
            value,
            reinitialize,
        })
    }

    fn definition(&self, name: &str) -> Option<StatDefinition> {
        match self.catalog.find_stat_definition(name) {
            Ok(definition) => definition,
            Err(e) => {
                tracing::warn!(name, error = %e, "Catalog lookup failed, using table rules");
                None
            }
        }
    }
}
