//! Checks shared by every rule set: value domains, enumerations and the
//! table-driven exclusivity rules.

use super::traits::{RuleContext, Verdict};
use crate::error::ValidationFailure;
use crate::resolver::ResolvedStat;
use crate::suggest::SuggestionPolicy;
use crate::tables;
use crate::value_objects::{
    subtype, Archetype, ArchetypeState, Category, Placement, StatDefinition, StatValue,
    ValueDomain,
};

// =============================================================================
// Failures
// =============================================================================

pub fn exclusive(name: &str, owners: &str) -> ValidationFailure {
    ValidationFailure::new(format!("{} is only available to {} characters.", name, owners))
}

pub fn requires(name: &str, prerequisite: &str) -> ValidationFailure {
    ValidationFailure::new(format!("{} requires {}.", name, prerequisite))
}

// =============================================================================
// Value domains
// =============================================================================

/// Integer check against an inclusive range.
pub fn numeric(name: &str, value: &StatValue, min: i32, max: i32) -> Result<StatValue, ValidationFailure> {
    let n = value.as_int().ok_or_else(|| {
        ValidationFailure::new(format!("{} must be a number, got '{}'.", name, value))
    })?;
    if n < min || n > max {
        return Err(ValidationFailure::new(format!(
            "{} must be between {} and {}, got {}.",
            name, min, max, n
        )));
    }
    Ok(StatValue::Int(n))
}

/// Case-insensitive membership; returns the canonical spelling.
pub fn enumerated<'v>(
    label: &str,
    value: &StatValue,
    options: impl IntoIterator<Item = &'v str> + Clone,
    policy: &SuggestionPolicy,
) -> Result<StatValue, ValidationFailure> {
    let text = value.to_string();
    let wanted = text.trim();
    if let Some(found) = options
        .clone()
        .into_iter()
        .find(|o| o.eq_ignore_ascii_case(wanted))
    {
        return Ok(StatValue::text(found));
    }
    Err(ValidationFailure::with_suggestions(
        format!("'{}' is not a valid {}.", wanted, label),
        policy.rank(wanted, options),
    ))
}

/// Trimmed text, unchanged otherwise.
pub fn free_text(value: &StatValue) -> StatValue {
    match value {
        StatValue::Text(s) => StatValue::text(s.trim()),
        other => StatValue::text(other.to_string()),
    }
}

/// Range every stat of a category accepts unless something narrower applies.
pub fn category_domain(placement: Placement) -> ValueDomain {
    let (min, max) = match placement.category {
        Category::Attributes => (1, 5),
        Category::Abilities | Category::SecondaryAbilities | Category::Virtues => (0, 5),
        Category::Powers if placement.subtype == subtype::COMBODISCIPLINE => {
            return ValueDomain::FreeText
        }
        Category::Powers => (0, 5),
        Category::Backgrounds | Category::Pools | Category::Advantages => (0, 10),
        Category::Merits | Category::Flaws => (1, 7),
        Category::Identity | Category::Specialties | Category::Other => {
            return ValueDomain::FreeText
        }
    };
    ValueDomain::Numeric { min, max }
}

/// Stats whose range differs from their category's.
pub fn stat_override(name: &str, placement: Placement) -> Option<(i32, i32)> {
    let range = match (placement.category, name.to_lowercase().as_str()) {
        (Category::Backgrounds, "organizational rank" | "generation" | "avatar") => (0, 5),
        (Category::Pools, "quintessence" | "paradox") => (0, 20),
        (Category::Pools, "arete") => (1, 10),
        (Category::Pools, "path rating" | "conviction") => (0, 10),
        (Category::Identity, "rank") => (0, 5),
        (Category::Merits, "gnosis") => (5, 7),
        _ => return None,
    };
    Some(range)
}

/// Check a value against a domain.
pub fn apply_domain(
    name: &str,
    value: &StatValue,
    domain: &ValueDomain,
    policy: &SuggestionPolicy,
) -> Result<StatValue, ValidationFailure> {
    match domain {
        ValueDomain::Numeric { min, max } => numeric(name, value, *min, *max),
        ValueDomain::Enumerated { values } => {
            enumerated(name, value, values.iter().map(String::as_str), policy)
        }
        ValueDomain::FreeText => Ok(free_text(value)),
    }
}

/// Fallback validation for values no rule set claimed.
pub fn shared_domain(
    stat: &ResolvedStat,
    value: &StatValue,
    definition: Option<&StatDefinition>,
    policy: &SuggestionPolicy,
) -> Result<StatValue, ValidationFailure> {
    let domain = match (definition, stat_override(&stat.name, stat.placement)) {
        (Some(definition), _) => definition.value_domain.clone(),
        (None, Some((min, max))) => ValueDomain::Numeric { min, max },
        (None, None) => category_domain(stat.placement),
    };
    apply_domain(&stat.name, value, &domain, policy)
}

/// Rules every splat shares: Nature/Demeanor and the sub-archetype field.
pub fn shared_rules(
    ctx: &RuleContext<'_>,
    stat: &ResolvedStat,
    value: &StatValue,
) -> Result<Verdict, ValidationFailure> {
    if stat.placement.category != Category::Identity {
        return Ok(Verdict::Defer);
    }
    let name = stat.name.as_str();
    if name == "Nature" || name == "Demeanor" {
        let label = name.to_lowercase();
        return enumerated(
            &label,
            value,
            tables::PERSONALITY_ARCHETYPES.iter().copied(),
            &ctx.policy,
        )
        .map(Verdict::Accept);
    }
    if let Some(archetype) = ctx.state.archetype {
        if stat.placement.subtype == subtype::LINEAGE
            && name.eq_ignore_ascii_case(archetype.subtype_field())
        {
            let kinds = tables::kinds(archetype);
            let label = format!("{} {}", archetype, name.to_lowercase());
            return enumerated(&label, value, kinds.iter().copied(), &ctx.policy)
                .map(Verdict::Accept);
        }
    }
    Ok(Verdict::Defer)
}

// =============================================================================
// Exclusivity
// =============================================================================

const RENOWN_ACCESS: &[tables::Access] = &[tables::SHIFTER];

fn check_list(
    name: &str,
    access: Option<&'static [tables::Access]>,
    state: &ArchetypeState,
) -> Result<(), ValidationFailure> {
    match access {
        Some(list) if !tables::admitted(list, state) => {
            Err(exclusive(name, &tables::describe(list)))
        }
        _ => Ok(()),
    }
}

fn archetype_list(archetypes: &[Archetype]) -> String {
    archetypes
        .iter()
        .map(Archetype::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Table-driven exclusivity: restricted abilities, backgrounds and virtues,
/// power families, pools, renown, foreign identity fields and catalog
/// restrictions.
pub fn check_shared_access(
    stat: &ResolvedStat,
    state: &ArchetypeState,
    definition: Option<&StatDefinition>,
) -> Result<(), ValidationFailure> {
    let name = stat.name.as_str();

    if let (Some(definition), Some(archetype)) = (definition, state.archetype) {
        if !definition.allows(archetype) {
            let owners = definition.archetype_restriction.as_deref().unwrap_or(&[]);
            return Err(exclusive(name, &archetype_list(owners)));
        }
    }

    match stat.placement.category {
        Category::Abilities => {
            check_list(name, tables::restriction(tables::RESTRICTED_ABILITIES, name), state)
        }
        Category::Backgrounds => check_list(
            name,
            tables::restriction(tables::RESTRICTED_BACKGROUNDS, name),
            state,
        ),
        Category::Virtues => {
            check_list(name, tables::restriction(tables::RESTRICTED_VIRTUES, name), state)
        }
        Category::Powers => check_list(
            name,
            Some(tables::power_access(stat.placement.subtype)).filter(|l| !l.is_empty()),
            state,
        ),
        Category::Pools => check_pool(name, state),
        Category::Advantages => check_list(name, Some(RENOWN_ACCESS), state),
        Category::Identity => check_identity(name, state),
        _ => Ok(()),
    }
}

fn check_pool(name: &str, state: &ArchetypeState) -> Result<(), ValidationFailure> {
    if tables::find_pool(name).is_none() {
        return Ok(());
    }
    let allowed = tables::pool_set(state);
    if allowed.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
        return Ok(());
    }
    let owners = tables::pool_owners(name);
    let same_splat = state
        .archetype
        .map(|a| owners.iter().any(|o| o == a.as_str()))
        .unwrap_or(false);
    match (same_splat, state.kind()) {
        (true, Some(kind)) => Err(ValidationFailure::new(format!(
            "{} is not available to {} characters.",
            name, kind
        ))),
        _ => Err(exclusive(name, &owners.join(" or "))),
    }
}

fn check_identity(name: &str, state: &ArchetypeState) -> Result<(), ValidationFailure> {
    let Some(archetype) = state.archetype else {
        return Ok(());
    };
    if tables::find_identity(archetype, name).is_some() {
        return Ok(());
    }
    let owners = tables::identity_owners(name);
    if owners.is_empty() {
        return Ok(());
    }
    Err(exclusive(name, &archetype_list(&owners)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Instancing;

    fn stat(name: &str, category: Category, sub: &'static str) -> ResolvedStat {
        ResolvedStat::new(name, Placement::new(category, sub))
    }

    #[test]
    fn numeric_enforces_bounds() {
        assert_eq!(numeric("Strength", &StatValue::text("5"), 1, 5), Ok(StatValue::Int(5)));
        assert!(numeric("Strength", &StatValue::Int(6), 1, 5).is_err());
        assert!(numeric("Strength", &StatValue::Int(0), 1, 5).is_err());
        let err = numeric("Strength", &StatValue::text("lots"), 1, 5).unwrap_err();
        assert!(err.message.contains("must be a number"));
    }

    #[test]
    fn enumerated_returns_canonical_or_suggests() {
        let policy = SuggestionPolicy::default();
        assert_eq!(
            enumerated("clan", &StatValue::text("brujah"), tables::CLANS.iter().copied(), &policy),
            Ok(StatValue::text("Brujah"))
        );
        let err = enumerated("clan", &StatValue::text("Bruja"), tables::CLANS.iter().copied(), &policy)
            .unwrap_err();
        assert!(err.suggestions.contains(&"Brujah".to_string()));
    }

    #[test]
    fn combination_disciplines_are_free_text() {
        let combo = stat("Iron Heart", Category::Powers, subtype::COMBODISCIPLINE);
        let policy = SuggestionPolicy::default();
        assert_eq!(
            shared_domain(&combo, &StatValue::text(" Learned "), None, &policy),
            Ok(StatValue::text("Learned"))
        );
        assert_eq!(
            shared_domain(&combo, &StatValue::text("3"), None, &policy),
            Ok(StatValue::text("3"))
        );
    }

    #[test]
    fn catalog_domain_beats_overrides_and_categories() {
        let policy = SuggestionPolicy::default();
        let rank = stat("Organizational Rank", Category::Backgrounds, subtype::BACKGROUND);
        assert!(shared_domain(&rank, &StatValue::Int(6), None, &policy).is_err());

        let definition = StatDefinition::numeric(
            "Organizational Rank",
            rank.placement,
            0,
            8,
            Instancing::Optional,
        );
        assert_eq!(
            shared_domain(&rank, &StatValue::Int(6), Some(&definition), &policy),
            Ok(StatValue::Int(6))
        );
    }

    #[test]
    fn restricted_backgrounds_name_their_owners() {
        let mage = ArchetypeState::new(Archetype::Mage);
        let herd = stat("Herd", Category::Backgrounds, subtype::BACKGROUND);
        let err = check_shared_access(&herd, &mage, None).unwrap_err();
        assert_eq!(err.message, "Herd is only available to Vampire characters.");
        assert!(err.is_exclusivity());
    }

    #[test]
    fn foreign_identity_fields_are_exclusive() {
        let hunter = ArchetypeState::new(Archetype::Hunter);
        let tribe = stat("Tribe", Category::Identity, subtype::LINEAGE);
        let err = check_shared_access(&tribe, &hunter, None).unwrap_err();
        assert_eq!(
            err.message,
            "Tribe is only available to Shifter or Mortal+ characters."
        );

        let custom = stat("Hometown", Category::Identity, subtype::LINEAGE);
        assert!(check_shared_access(&custom, &hunter, None).is_ok());
    }

    #[test]
    fn pools_outside_the_set_are_rejected() {
        let nuwisha = ArchetypeState::new(Archetype::Shifter).with_lineage("Type", "Nuwisha");
        let rage = stat("Rage", Category::Pools, subtype::DUAL);
        let err = check_shared_access(&rage, &nuwisha, None).unwrap_err();
        assert_eq!(err.message, "Rage is not available to Nuwisha characters.");

        let mage = ArchetypeState::new(Archetype::Mage);
        let blood = stat("Blood Pool", Category::Pools, subtype::DUAL);
        assert!(check_shared_access(&blood, &mage, None)
            .unwrap_err()
            .is_exclusivity());
    }
}
