//! Category hints typed after a `/`, e.g. `Allies/background`.

use crate::value_objects::{subtype, Category, Placement};

/// Where a recognised hint points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintTarget {
    /// A fixed category and subtype.
    Exact(Placement),
    /// A category whose subtype comes from the name (e.g. `merit`).
    Category(Category),
}

/// Target of a lower-cased hint. Plural spellings are accepted.
pub fn hint_target(hint: &str) -> Option<HintTarget> {
    let hint = hint.trim().to_lowercase();
    lookup(&hint).or_else(|| hint.strip_suffix('s').and_then(lookup))
}

fn exact(category: Category, sub: &'static str) -> Option<HintTarget> {
    Some(HintTarget::Exact(Placement::new(category, sub)))
}

fn lookup(hint: &str) -> Option<HintTarget> {
    if let Some(prefix) = hint.strip_suffix("_merit") {
        return Category::Merits.find_subtype(prefix).and_then(|s| exact(Category::Merits, s));
    }
    if let Some(prefix) = hint.strip_suffix("_flaw") {
        return Category::Flaws.find_subtype(prefix).and_then(|s| exact(Category::Flaws, s));
    }
    if let Some(sub) = Category::Powers.find_subtype(hint) {
        return exact(Category::Powers, sub);
    }
    match hint {
        "physical" | "social" | "mental" => Category::Attributes
            .find_subtype(hint)
            .and_then(|s| exact(Category::Attributes, s)),
        "attribute" => Some(HintTarget::Category(Category::Attributes)),
        "talent" | "skill" | "knowledge" => Category::Abilities
            .find_subtype(hint)
            .and_then(|s| exact(Category::Abilities, s)),
        "ability" | "abilities" => Some(HintTarget::Category(Category::Abilities)),
        "secondary_talent" | "secondary_skill" | "secondary_knowledge" => {
            Category::SecondaryAbilities
                .find_subtype(hint)
                .and_then(|s| exact(Category::SecondaryAbilities, s))
        }
        "secondary" | "secondary_ability" | "secondary_abilities" => {
            Some(HintTarget::Category(Category::SecondaryAbilities))
        }
        "background" => exact(Category::Backgrounds, subtype::BACKGROUND),
        "merit" => Some(HintTarget::Category(Category::Merits)),
        "flaw" => Some(HintTarget::Category(Category::Flaws)),
        "virtue" | "virtues" => exact(Category::Virtues, subtype::MORAL),
        "discipline_power" => exact(Category::Powers, subtype::DISCIPLINE),
        "power" => Some(HintTarget::Category(Category::Powers)),
        "pool" => exact(Category::Pools, subtype::DUAL),
        "moral" => exact(Category::Pools, subtype::MORAL),
        "advantage" => exact(Category::Pools, subtype::ADVANTAGE),
        "renown" => exact(Category::Advantages, subtype::RENOWN),
        "personal" => exact(Category::Identity, subtype::PERSONAL),
        "lineage" => exact(Category::Identity, subtype::LINEAGE),
        "identity" => Some(HintTarget::Category(Category::Identity)),
        "splat" => exact(Category::Other, subtype::SPLAT),
        _ => None,
    }
}
