//! Legacy sheet repair.
//!
//! Older sheets were stored as nested `category → subtype → name → facets`
//! maps and sometimes parented stats under a missing or `None` category.
//! Import copies every well-placed entry, then re-resolves the rest against
//! the character the well-placed entries describe.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use darkroster_domain::{
    compose_instanced, split_instanced, ArchetypeState, AttributeStore, CharacterSheet,
    Placement, Resolution, StatCatalog, StatKey, StatResolver, StatToken, StatValue,
    ValueFacets,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepairError {
    #[error("Legacy sheet must be a JSON object of categories, got {0}")]
    NotAnObject(&'static str),
}

/// What happened to each legacy entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// Entries copied to the slot they were stored under.
    pub imported: usize,
    /// Entries moved out of an invalid slot, by their new key.
    pub relocated: Vec<StatKey>,
    /// Names of entries that could not be placed.
    pub dropped: Vec<String>,
}

/// An entry whose stored category/subtype is unusable.
struct Misplaced {
    name: String,
    facets: ValueFacets,
}

impl Misplaced {
    /// The splat goes first so later entries resolve against it.
    fn priority(&self) -> u8 {
        if self.name.eq_ignore_ascii_case("Splat") {
            0
        } else {
            1
        }
    }
}

pub struct LegacySheetRepair {
    resolver: StatResolver,
}

impl LegacySheetRepair {
    pub fn new(catalog: Arc<dyn StatCatalog>) -> Self {
        Self {
            resolver: StatResolver::new(catalog),
        }
    }

    /// Import a nested legacy sheet. Accepts either the bare category map or
    /// an export wrapper with the map under `stats`.
    pub fn import(&self, document: &Value) -> Result<(CharacterSheet, RepairReport), RepairError> {
        let categories = categories(document)?;
        let mut sheet = CharacterSheet::new();
        let mut report = RepairReport::default();
        let mut misplaced = Vec::new();

        for (category, subtypes) in categories {
            let Some(subtypes) = subtypes.as_object() else {
                tracing::warn!(category = %category, "Dropping non-object legacy category");
                report.dropped.push(category.clone());
                continue;
            };
            for (subtype, stats) in subtypes {
                let Some(stats) = stats.as_object() else {
                    tracing::warn!(
                        category = %category,
                        subtype = %subtype,
                        "Dropping non-object legacy subtype"
                    );
                    report.dropped.push(subtype.clone());
                    continue;
                };
                let placement = Placement::parse(category, subtype).ok();
                for (name, raw) in stats {
                    let Some(facets) = facets(raw) else {
                        tracing::warn!(name = %name, "Dropping legacy entry with unreadable value");
                        report.dropped.push(name.clone());
                        continue;
                    };
                    match placement {
                        Some(placement) => {
                            sheet.insert(StatKey::new(placement, name.as_str()), facets);
                            report.imported += 1;
                        }
                        None => misplaced.push(Misplaced {
                            name: name.clone(),
                            facets,
                        }),
                    }
                }
            }
        }

        misplaced.sort_by_key(Misplaced::priority);
        for entry in misplaced {
            self.relocate(&mut sheet, entry, &mut report);
        }

        tracing::info!(
            imported = report.imported,
            relocated = report.relocated.len(),
            dropped = report.dropped.len(),
            "Legacy sheet imported"
        );
        Ok((sheet, report))
    }

    fn relocate(&self, sheet: &mut CharacterSheet, entry: Misplaced, report: &mut RepairReport) {
        let (base, qualifier) = split_instanced(&entry.name);
        let state = ArchetypeState::from_store(&*sheet);
        let stat = match self.resolver.resolve(&StatToken::bare(base), &state) {
            Resolution::Placed(stat) => stat,
            Resolution::Unverified { .. } | Resolution::Unresolved => {
                tracing::warn!(name = %entry.name, "Dropping legacy entry with no known slot");
                report.dropped.push(entry.name);
                return;
            }
        };

        let key = stat.key(compose_instanced(&stat.name, qualifier));
        if sheet.contains(&key) {
            tracing::warn!(
                name = %entry.name,
                key = %key,
                "Dropping misplaced duplicate of a stored stat"
            );
            report.dropped.push(entry.name);
            return;
        }

        tracing::debug!(name = %entry.name, key = %key, "Relocated legacy entry");
        sheet.insert(key.clone(), entry.facets);
        report.relocated.push(key);
    }
}

fn categories(document: &Value) -> Result<&Map<String, Value>, RepairError> {
    let object = document
        .as_object()
        .ok_or_else(|| RepairError::NotAnObject(kind(document)))?;
    match object.get("stats").and_then(Value::as_object) {
        Some(stats) if object.contains_key("character_id") => Ok(stats),
        _ => Ok(object),
    }
}

/// Legacy values are either `{perm, temp}` facets or a bare value for both.
fn facets(raw: &Value) -> Option<ValueFacets> {
    if raw.is_object() {
        return serde_json::from_value(raw.clone()).ok();
    }
    serde_json::from_value::<StatValue>(raw.clone())
        .ok()
        .map(ValueFacets::uniform)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
