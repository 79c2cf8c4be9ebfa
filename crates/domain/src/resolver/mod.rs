//! Category/subtype resolver.
//!
//! Maps a parsed token to the `(category, subtype, name)` slot it belongs in,
//! given what the character is. The first rule that matches wins:
//!
//! 1. `Splat`
//! 2. an explicit hint
//! 3. context-dependent names (`Rank`, `Nature`, `Gnosis`, `Conviction`)
//! 4. identity fields
//! 5. the reference-table cascade, then the catalog

mod cascade;

use std::sync::Arc;

use crate::ports::StatCatalog;
use crate::suggest::SuggestionPolicy;
use crate::tables::{self, HintTarget};
use crate::value_objects::{
    subtype, ArchetypeState, Category, Placement, StatKey, StatToken,
};

pub use cascade::identity_heuristic;

/// A token placed in a concrete slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStat {
    /// Canonical name (may differ from what was typed, e.g. `Organizational Rank`).
    pub name: String,
    pub placement: Placement,
}

impl ResolvedStat {
    pub fn new(name: impl Into<String>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
        }
    }

    pub fn key(&self, storage_name: impl Into<String>) -> StatKey {
        StatKey::new(self.placement, storage_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Placed(ResolvedStat),
    /// A hint the tables do not know, passed through literally. Never written.
    Unverified {
        category: String,
        subtype: String,
        name: String,
    },
    Unresolved,
}

pub struct StatResolver {
    catalog: Arc<dyn StatCatalog>,
}

impl StatResolver {
    pub fn new(catalog: Arc<dyn StatCatalog>) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, token: &StatToken, state: &ArchetypeState) -> Resolution {
        let name = token.name.trim();

        if name.eq_ignore_ascii_case("Splat") {
            return Resolution::Placed(ResolvedStat::new(
                "Splat",
                Placement::new(Category::Other, subtype::SPLAT),
            ));
        }

        if let Some(hint) = token.hint.as_deref() {
            return self.resolve_hint(name, hint, state);
        }

        if let Some(resolved) = cascade::special_case(name, state) {
            return Resolution::Placed(resolved);
        }
        if let Some(resolved) = cascade::identity(name, state) {
            return Resolution::Placed(resolved);
        }
        if let Some(resolved) = cascade::from_tables(name, state) {
            return Resolution::Placed(resolved);
        }

        match self.from_catalog(name, None) {
            Some(resolved) => Resolution::Placed(resolved),
            None => Resolution::Unresolved,
        }
    }

    /// Known names close to `name`: table names plus catalog substring hits.
    pub fn suggestions(&self, name: &str, policy: &SuggestionPolicy) -> Vec<String> {
        let catalog_names: Vec<String> = self
            .catalog
            .find_stat_definitions(name)
            .map(|defs| defs.into_iter().map(|d| d.name).collect())
            .unwrap_or_default();

        policy.rank(
            name,
            catalog_names
                .iter()
                .map(String::as_str)
                .chain(tables::KNOWN_NAMES.iter().copied()),
        )
    }

    fn resolve_hint(&self, name: &str, hint: &str, state: &ArchetypeState) -> Resolution {
        match tables::hint_target(hint) {
            Some(HintTarget::Exact(placement)) => {
                if let Some(renamed) = hinted_special(name, state, |p| p == placement) {
                    return Resolution::Placed(renamed);
                }
                let canonical = cascade::in_category(placement.category, name, state)
                    .filter(|r| r.placement == placement)
                    .map(|r| r.name)
                    .unwrap_or_else(|| name.to_string());
                Resolution::Placed(ResolvedStat::new(canonical, placement))
            }
            Some(HintTarget::Category(category)) => {
                if let Some(renamed) = hinted_special(name, state, |p| p.category == category) {
                    return Resolution::Placed(renamed);
                }
                match cascade::in_category(category, name, state)
                    .or_else(|| self.from_catalog(name, Some(category)))
                {
                    Some(resolved) => Resolution::Placed(resolved),
                    None => Resolution::Unresolved,
                }
            }
            None => {
                let (category, subtype) = match hint.split_once('.') {
                    Some((c, s)) => (c.to_string(), s.to_string()),
                    None => (hint.to_string(), hint.to_string()),
                };
                Resolution::Unverified {
                    category,
                    subtype,
                    name: name.to_string(),
                }
            }
        }
    }

    fn from_catalog(&self, name: &str, category: Option<Category>) -> Option<ResolvedStat> {
        let definition = match self.catalog.find_stat_definition(name) {
            Ok(definition) => definition?,
            Err(e) => {
                tracing::warn!(name, error = %e, "Catalog lookup failed while resolving");
                return None;
            }
        };
        if category.is_some_and(|c| c != definition.category) {
            return None;
        }
        let placement = definition.placement().ok()?;
        Some(ResolvedStat::new(definition.name, placement))
    }
}

/// Context-dependent names keep their rename when the hint points at the
/// slot the rename lives in, even if the splat would place them elsewhere.
fn hinted_special(
    name: &str,
    state: &ArchetypeState,
    fits: impl Fn(Placement) -> bool,
) -> Option<ResolvedStat> {
    let unset = ArchetypeState::unset();
    let found = [state, &unset]
        .into_iter()
        .filter_map(|s| cascade::special_case(name, s))
        .find(|r| fits(r.placement));
    found
}
