//! Resource pools and renown.

use super::access::{Access, FOMORI, GHOUL, KAMI, KINAIN, MORTAL_PLUS};
use crate::value_objects::subtype::{ADVANTAGE, DUAL, MORAL};
use crate::value_objects::{Archetype, ArchetypeState, Category, Placement};

/// Every pool and where it is stored.
pub const POOLS: &[(&str, &str)] = &[
    ("Willpower", DUAL),
    ("Blood Pool", DUAL),
    ("Rage", DUAL),
    ("Gnosis", DUAL),
    ("Quintessence", DUAL),
    ("Paradox", DUAL),
    ("Glamour", DUAL),
    ("Banality", DUAL),
    ("Conviction", DUAL),
    ("Path Rating", MORAL),
    ("Arete", ADVANTAGE),
];

/// Canonical pool name and its placement.
pub fn find_pool(name: &str) -> Option<(&'static str, Placement)> {
    let wanted = name.trim();
    POOLS
        .iter()
        .find(|(pool, _)| pool.eq_ignore_ascii_case(wanted))
        .map(|(pool, sub)| (*pool, Placement::new(Category::Pools, *sub)))
}

/// A pool a character of some archetype starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSeed {
    pub name: &'static str,
    pub baseline: i32,
}

const fn seed(name: &'static str, baseline: i32) -> PoolSeed {
    PoolSeed { name, baseline }
}

/// Pools granted to a whole splat, or to one sub-archetype of it.
const POOL_GRANTS: &[(Access, &[PoolSeed])] = &[
    (
        Access::splat(Archetype::Vampire),
        &[seed("Willpower", 1), seed("Blood Pool", 10), seed("Path Rating", 2)],
    ),
    (
        Access::splat(Archetype::Mage),
        &[
            seed("Willpower", 5),
            seed("Quintessence", 0),
            seed("Paradox", 0),
            seed("Arete", 1),
        ],
    ),
    (
        Access::splat(Archetype::Changeling),
        &[seed("Willpower", 4), seed("Glamour", 4), seed("Banality", 3)],
    ),
    (
        Access::splat(Archetype::Hunter),
        &[seed("Willpower", 3), seed("Conviction", 3)],
    ),
    (MORTAL_PLUS, &[seed("Willpower", 1)]),
    (GHOUL, &[seed("Blood Pool", 1)]),
    (KINAIN, &[seed("Banality", 5)]),
    (FOMORI, &[seed("Willpower", 3), seed("Rage", 1)]),
    (KAMI, &[seed("Willpower", 3), seed("Gnosis", 1)]),
];

/// Shifter types that have no Rage.
const RAGELESS: &[&str] = &["Ananasi", "Nuwisha"];

/// Shifter pools depend on the type; everything else comes from `POOL_GRANTS`.
fn shifter_pools(kind: Option<&str>) -> Vec<PoolSeed> {
    let mut pools = vec![seed("Willpower", 3)];
    let rageless = kind
        .map(|k| RAGELESS.iter().any(|r| r.eq_ignore_ascii_case(k)))
        .unwrap_or(false);
    if !rageless {
        pools.push(seed("Rage", 1));
    }
    pools.push(seed("Gnosis", 1));
    pools
}

/// Pools valid for the character, with their baselines.
pub fn pool_set(state: &ArchetypeState) -> Vec<PoolSeed> {
    if state.is(Archetype::Shifter) {
        return shifter_pools(state.kind());
    }
    POOL_GRANTS
        .iter()
        .filter(|(access, _)| access.admits(state))
        .flat_map(|(_, seeds)| seeds.iter().copied())
        .collect()
}

/// Splats (and sub-archetypes) that hold `pool`.
pub fn pool_owners(pool: &str) -> Vec<String> {
    let mut owners: Vec<String> = POOL_GRANTS
        .iter()
        .filter(|(_, seeds)| seeds.iter().any(|s| s.name.eq_ignore_ascii_case(pool)))
        .map(|(access, _)| access.label())
        .collect();
    if shifter_pools(None)
        .iter()
        .any(|s| s.name.eq_ignore_ascii_case(pool))
    {
        owners.insert(0, Archetype::Shifter.to_string());
    }
    owners
}

/// Renown per shifter type.
pub const RENOWN: &[(&str, &[&str])] = &[
    ("Garou", &["Glory", "Honor", "Wisdom"]),
    ("Ajaba", &["Cunning", "Ferocity", "Obligation"]),
    ("Ananasi", &["Cunning", "Obedience", "Wisdom"]),
    ("Bastet", &["Cunning", "Ferocity", "Obligation"]),
    ("Corax", &["Glory", "Honor", "Wisdom"]),
    ("Gurahl", &["Honor", "Succor", "Wisdom"]),
    ("Kitsune", &["Chie", "Kagayaki", "Toku"]),
    ("Mokole", &["Glory", "Honor", "Wisdom"]),
    ("Nagah", &["Ferocity", "Obligation", "Wisdom"]),
    ("Nuwisha", &["Humor"]),
    ("Ratkin", &["Cunning", "Infamy", "Obligation"]),
    ("Rokea", &["Harmony", "Innovation", "Valor"]),
];

/// Renown names a shifter type tracks.
pub fn renown_for(kind: &str) -> &'static [&'static str] {
    RENOWN
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(kind.trim()))
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Canonical spelling of a renown name of any type.
pub fn find_renown(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    RENOWN
        .iter()
        .flat_map(|(_, names)| names.iter().copied())
        .find(|r| r.eq_ignore_ascii_case(wanted))
}
