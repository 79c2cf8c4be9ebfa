use super::ResolvedStat;
use crate::tables::{self, COMMON_IDENTITY};
use crate::value_objects::{subtype, Archetype, ArchetypeState, Category, Placement};

fn placed(name: &str, category: Category, sub: &'static str) -> ResolvedStat {
    ResolvedStat::new(name, Placement::new(category, sub))
}

/// `personal` for names, dates and birthplaces, `lineage` for everything else.
pub fn identity_heuristic(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if ["name", "date", "birth"].iter().any(|w| lower.contains(w)) {
        subtype::PERSONAL
    } else {
        subtype::LINEAGE
    }
}

/// Names whose slot depends on the splat.
pub(super) fn special_case(name: &str, state: &ArchetypeState) -> Option<ResolvedStat> {
    let resolved = match name.to_lowercase().as_str() {
        "rank" if state.is(Archetype::Shifter) => {
            placed("Rank", Category::Identity, subtype::LINEAGE)
        }
        "rank" => placed(
            "Organizational Rank",
            Category::Backgrounds,
            subtype::BACKGROUND,
        ),
        "nature"
            if state.is(Archetype::Changeling)
                || state.is_kind(Archetype::MortalPlus, "Kinain") =>
        {
            placed("Nature", Category::Powers, subtype::REALM)
        }
        "nature" => placed("Nature", Category::Identity, subtype::PERSONAL),
        "gnosis" if state.is_kind(Archetype::MortalPlus, "Kinfolk") => {
            placed("Gnosis", Category::Merits, subtype::SUPERNATURAL)
        }
        "gnosis" => placed("Gnosis", Category::Pools, subtype::DUAL),
        "conviction" if state.is(Archetype::Hunter) => {
            placed("Conviction", Category::Pools, subtype::DUAL)
        }
        "conviction" => placed("Conviction", Category::Virtues, subtype::MORAL),
        _ => return None,
    };
    Some(resolved)
}

/// Identity fields: the splat's own table first, then any other splat's
/// field placed by name heuristics.
pub(super) fn identity(name: &str, state: &ArchetypeState) -> Option<ResolvedStat> {
    let own = match state.archetype {
        Some(archetype) => tables::find_identity(archetype, name),
        None => tables::find_pair(COMMON_IDENTITY, name),
    };
    if let Some((field, sub)) = own {
        return Some(placed(field, Category::Identity, sub));
    }
    tables::any_identity(name)
        .map(|field| placed(field, Category::Identity, identity_heuristic(field)))
}

fn path_order(state: &ArchetypeState) -> [&'static str; 3] {
    if state.is_kind(Archetype::MortalPlus, "Sorcerer") {
        [subtype::HEDGE_MAGIC, subtype::THAUMATURGY, subtype::NECROMANCY]
    } else {
        [subtype::THAUMATURGY, subtype::NECROMANCY, subtype::HEDGE_MAGIC]
    }
}

fn mystic_order(state: &ArchetypeState) -> [&'static str; 3] {
    if state.is(Archetype::Changeling) || state.is_kind(Archetype::MortalPlus, "Kinain") {
        [subtype::REALM, subtype::ART, subtype::SPHERE]
    } else {
        [subtype::SPHERE, subtype::ART, subtype::REALM]
    }
}

const GENERIC_POWERS: [&str; 6] = [
    subtype::NUMINA,
    subtype::RITE,
    subtype::COMBODISCIPLINE,
    subtype::EDGE,
    subtype::BLESSING,
    subtype::CHARM,
];

fn first_power(families: &[&'static str], name: &str) -> Option<ResolvedStat> {
    families.iter().find_map(|family| {
        tables::find_power(family, name).map(|p| placed(p, Category::Powers, *family))
    })
}

fn exclusive_power(name: &str, state: &ArchetypeState) -> Option<ResolvedStat> {
    if let Some(discipline) = tables::find_in(tables::DISCIPLINES, name) {
        return Some(placed(discipline, Category::Powers, subtype::DISCIPLINE));
    }
    if let Some(path) = first_power(&path_order(state), name) {
        return Some(path);
    }
    let (gift, owners) = tables::gift(name)?;
    let can_hold = tables::admitted(tables::power_access(subtype::GIFT), state);
    if !can_hold || tables::gift_owned(owners, state) {
        return Some(placed(gift, Category::Powers, subtype::GIFT));
    }
    None
}

/// The reference-table cascade.
pub(super) fn from_tables(name: &str, state: &ArchetypeState) -> Option<ResolvedStat> {
    if let Some(virtue) = tables::find_in(tables::VIRTUES, name) {
        return Some(placed(virtue, Category::Virtues, subtype::MORAL));
    }
    if let Some(power) = exclusive_power(name, state) {
        return Some(power);
    }
    if let Some(found) = in_category(Category::Attributes, name, state)
        .or_else(|| in_category(Category::Abilities, name, state))
        .or_else(|| in_category(Category::SecondaryAbilities, name, state))
        .or_else(|| in_category(Category::Merits, name, state))
        .or_else(|| in_category(Category::Flaws, name, state))
        .or_else(|| in_category(Category::Backgrounds, name, state))
    {
        return Some(found);
    }
    if let Some(power) = first_power(&GENERIC_POWERS, name) {
        return Some(power);
    }
    if let Some(power) = first_power(&mystic_order(state), name) {
        return Some(power);
    }
    if let Some(renown) = in_category(Category::Advantages, name, state) {
        return Some(renown);
    }
    if identity_heuristic(name) == subtype::PERSONAL {
        return Some(placed(name, Category::Identity, subtype::PERSONAL));
    }
    in_category(Category::Pools, name, state)
}

/// Find `name` within one category's tables.
pub(super) fn in_category(
    category: Category,
    name: &str,
    state: &ArchetypeState,
) -> Option<ResolvedStat> {
    match category {
        Category::Attributes => tables::find_pair(tables::ATTRIBUTES, name)
            .map(|(n, sub)| placed(n, category, sub)),
        Category::Abilities => tables::find_pair(tables::ABILITIES, name)
            .map(|(n, sub)| placed(n, category, sub)),
        Category::SecondaryAbilities => tables::find_pair(tables::SECONDARY_ABILITIES, name)
            .map(|(n, sub)| placed(n, category, sub)),
        Category::Backgrounds => tables::find_in(tables::BACKGROUNDS, name)
            .map(|n| placed(n, category, subtype::BACKGROUND)),
        Category::Merits => tables::find_merit(name).map(|m| placed(m.name, category, m.subtype)),
        Category::Flaws => tables::find_flaw(name).map(|f| placed(f.name, category, f.subtype)),
        Category::Virtues => {
            tables::find_in(tables::VIRTUES, name).map(|n| placed(n, category, subtype::MORAL))
        }
        Category::Powers => {
            let mut families = vec![subtype::DISCIPLINE];
            families.extend(path_order(state));
            families.push(subtype::GIFT);
            families.extend(GENERIC_POWERS);
            families.extend(mystic_order(state));
            first_power(&families, name)
        }
        Category::Pools => {
            tables::find_pool(name).map(|(n, placement)| ResolvedStat::new(n, placement))
        }
        Category::Advantages => {
            tables::find_renown(name).map(|n| placed(n, category, subtype::RENOWN))
        }
        Category::Identity => identity(name, state).or_else(|| {
            Some(placed(name.trim(), category, identity_heuristic(name)))
        }),
        Category::Specialties | Category::Other => None,
    }
}
