//! Static reference tables for the seven splats.
//!
//! Canonical names live here. Every lookup is case-insensitive and returns
//! the canonical spelling.

mod access;
mod hints;
mod lineage;
mod merits;
mod pools;
mod powers;
mod stats;

pub use access::*;
pub use hints::{hint_target, HintTarget};
pub use lineage::*;
pub use merits::{find_flaw, find_merit, TraitCost, FLAWS, MERITS};
pub use pools::{
    find_pool, find_renown, pool_owners, pool_set, renown_for, PoolSeed, POOLS, RENOWN,
};
pub use powers::*;
pub use stats::*;

use once_cell::sync::Lazy;

/// Canonical spelling of `name` in `list`.
pub fn find_in(list: &[&'static str], name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    list.iter().copied().find(|item| item.eq_ignore_ascii_case(wanted))
}

/// Canonical name and subtype of `name` in a `(name, subtype)` table.
pub fn find_pair(
    list: &[(&'static str, &'static str)],
    name: &str,
) -> Option<(&'static str, &'static str)> {
    let wanted = name.trim();
    list.iter()
        .copied()
        .find(|(item, _)| item.eq_ignore_ascii_case(wanted))
}

/// Access list of `name` in a restriction table, if it is restricted.
pub fn restriction(
    table: &[(&'static str, &'static [Access])],
    name: &str,
) -> Option<&'static [Access]> {
    table
        .iter()
        .find(|(item, _)| item.eq_ignore_ascii_case(name.trim()))
        .map(|(_, access)| *access)
}

/// Every stat name the tables know, for "did you mean" suggestions.
pub static KNOWN_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&'static str> = Vec::new();
    names.push("Splat");
    names.push("Rank");
    names.extend(ATTRIBUTES.iter().map(|(n, _)| *n));
    names.extend(ABILITIES.iter().map(|(n, _)| *n));
    names.extend(SECONDARY_ABILITIES.iter().map(|(n, _)| *n));
    names.extend(VIRTUES.iter().copied());
    names.extend(BACKGROUNDS.iter().copied());
    names.extend(MERITS.iter().map(|m| m.name));
    names.extend(FLAWS.iter().map(|f| f.name));
    names.extend(POOLS.iter().map(|(n, _)| *n));
    names.extend(RENOWN.iter().flat_map(|(_, r)| r.iter().copied()));
    names.extend(COMMON_IDENTITY.iter().map(|(n, _)| *n));
    for archetype in crate::value_objects::Archetype::ALL {
        names.extend(identity_fields(archetype).iter().map(|(n, _)| *n));
    }
    for power in crate::value_objects::Category::Powers.subtypes() {
        names.extend(power_names(power));
    }
    names.sort_unstable();
    names.dedup();
    names
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_helpers_return_canonical_spelling() {
        assert_eq!(find_in(VIRTUES, " self-control "), Some("Self-Control"));
        assert_eq!(
            find_pair(ATTRIBUTES, "wits"),
            Some(("Wits", crate::value_objects::subtype::MENTAL))
        );
        assert!(restriction(RESTRICTED_BACKGROUNDS, "generation").is_some());
        assert!(restriction(RESTRICTED_BACKGROUNDS, "Allies").is_none());
    }

    #[test]
    fn known_names_are_sorted_and_unique() {
        assert!(KNOWN_NAMES.windows(2).all(|w| w[0] < w[1]));
        assert!(KNOWN_NAMES.contains(&"Weather Control"));
        assert!(KNOWN_NAMES.contains(&"Clan"));
    }
}
