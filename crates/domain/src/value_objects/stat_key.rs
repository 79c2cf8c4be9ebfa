//! Stat location value objects - where a stat lives in the attribute store.
//!
//! Every stored stat is addressed by a `StatKey` (category, subtype, name).
//! Categories form a closed set and each one carries its own list of valid
//! subtypes, so a stat parented under a missing category cannot be built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Subtype names shared between the reference tables, the resolver and the rules.
pub mod subtype {
    pub const PHYSICAL: &str = "physical";
    pub const SOCIAL: &str = "social";
    pub const MENTAL: &str = "mental";
    pub const SUPERNATURAL: &str = "supernatural";

    pub const TALENT: &str = "talent";
    pub const SKILL: &str = "skill";
    pub const KNOWLEDGE: &str = "knowledge";
    pub const SECONDARY_TALENT: &str = "secondary_talent";
    pub const SECONDARY_SKILL: &str = "secondary_skill";
    pub const SECONDARY_KNOWLEDGE: &str = "secondary_knowledge";

    pub const BACKGROUND: &str = "background";
    pub const MORAL: &str = "moral";

    pub const DISCIPLINE: &str = "discipline";
    pub const COMBODISCIPLINE: &str = "combodiscipline";
    pub const THAUMATURGY: &str = "thaumaturgy";
    pub const NECROMANCY: &str = "necromancy";
    pub const HEDGE_MAGIC: &str = "hedge_magic";
    pub const NUMINA: &str = "numina";
    pub const GIFT: &str = "gift";
    pub const RITE: &str = "rite";
    pub const SPHERE: &str = "sphere";
    pub const ART: &str = "art";
    pub const REALM: &str = "realm";
    pub const EDGE: &str = "edge";
    pub const BLESSING: &str = "blessing";
    pub const CHARM: &str = "charm";

    pub const DUAL: &str = "dual";
    pub const ADVANTAGE: &str = "advantage";
    pub const RENOWN: &str = "renown";

    pub const PERSONAL: &str = "personal";
    pub const LINEAGE: &str = "lineage";

    pub const SPLAT: &str = "splat";
}

/// Top-level grouping of stats in the attribute store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Attributes,
    Abilities,
    SecondaryAbilities,
    Backgrounds,
    Merits,
    Flaws,
    Virtues,
    Powers,
    Pools,
    Advantages,
    Identity,
    Specialties,
    Other,
}

const ATTRIBUTE_SUBTYPES: &[&str] = &[subtype::PHYSICAL, subtype::SOCIAL, subtype::MENTAL];
const ABILITY_SUBTYPES: &[&str] = &[subtype::TALENT, subtype::SKILL, subtype::KNOWLEDGE];
const SECONDARY_ABILITY_SUBTYPES: &[&str] = &[
    subtype::SECONDARY_TALENT,
    subtype::SECONDARY_SKILL,
    subtype::SECONDARY_KNOWLEDGE,
];
const MERIT_FLAW_SUBTYPES: &[&str] = &[
    subtype::PHYSICAL,
    subtype::SOCIAL,
    subtype::MENTAL,
    subtype::SUPERNATURAL,
];
const POWER_SUBTYPES: &[&str] = &[
    subtype::DISCIPLINE,
    subtype::COMBODISCIPLINE,
    subtype::THAUMATURGY,
    subtype::NECROMANCY,
    subtype::HEDGE_MAGIC,
    subtype::NUMINA,
    subtype::GIFT,
    subtype::RITE,
    subtype::SPHERE,
    subtype::ART,
    subtype::REALM,
    subtype::EDGE,
    subtype::BLESSING,
    subtype::CHARM,
];
const POOL_SUBTYPES: &[&str] = &[subtype::DUAL, subtype::MORAL, subtype::ADVANTAGE];
const IDENTITY_SUBTYPES: &[&str] = &[subtype::PERSONAL, subtype::LINEAGE];
const SPECIALTY_SUBTYPES: &[&str] = &["attributes", "abilities", "secondary_abilities"];

impl Category {
    pub const ALL: [Category; 13] = [
        Self::Attributes,
        Self::Abilities,
        Self::SecondaryAbilities,
        Self::Backgrounds,
        Self::Merits,
        Self::Flaws,
        Self::Virtues,
        Self::Powers,
        Self::Pools,
        Self::Advantages,
        Self::Identity,
        Self::Specialties,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Abilities => "abilities",
            Self::SecondaryAbilities => "secondary_abilities",
            Self::Backgrounds => "backgrounds",
            Self::Merits => "merits",
            Self::Flaws => "flaws",
            Self::Virtues => "virtues",
            Self::Powers => "powers",
            Self::Pools => "pools",
            Self::Advantages => "advantages",
            Self::Identity => "identity",
            Self::Specialties => "specialties",
            Self::Other => "other",
        }
    }

    /// Valid subtypes for this category.
    pub fn subtypes(&self) -> &'static [&'static str] {
        match self {
            Self::Attributes => ATTRIBUTE_SUBTYPES,
            Self::Abilities => ABILITY_SUBTYPES,
            Self::SecondaryAbilities => SECONDARY_ABILITY_SUBTYPES,
            Self::Backgrounds => &[subtype::BACKGROUND],
            Self::Merits | Self::Flaws => MERIT_FLAW_SUBTYPES,
            Self::Virtues => &[subtype::MORAL],
            Self::Powers => POWER_SUBTYPES,
            Self::Pools => POOL_SUBTYPES,
            Self::Advantages => &[subtype::RENOWN],
            Self::Identity => IDENTITY_SUBTYPES,
            Self::Specialties => SPECIALTY_SUBTYPES,
            Self::Other => &[subtype::SPLAT],
        }
    }

    /// Returns the static subtype string matching `subtype`, case-insensitively.
    pub fn find_subtype(&self, subtype: &str) -> Option<&'static str> {
        let wanted = subtype.trim();
        self.subtypes()
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(wanted))
    }

    /// Whether values in this category are integers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Attributes
                | Self::Abilities
                | Self::SecondaryAbilities
                | Self::Backgrounds
                | Self::Merits
                | Self::Flaws
                | Self::Virtues
                | Self::Powers
                | Self::Pools
                | Self::Advantages
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attributes" | "attribute" => Ok(Self::Attributes),
            "abilities" | "ability" => Ok(Self::Abilities),
            "secondary_abilities" | "secondary_ability" => Ok(Self::SecondaryAbilities),
            "backgrounds" => Ok(Self::Backgrounds),
            "merits" => Ok(Self::Merits),
            "flaws" => Ok(Self::Flaws),
            "virtues" => Ok(Self::Virtues),
            "powers" | "power" => Ok(Self::Powers),
            "pools" => Ok(Self::Pools),
            "advantages" => Ok(Self::Advantages),
            "identity" => Ok(Self::Identity),
            "specialties" | "specialty" => Ok(Self::Specialties),
            "other" => Ok(Self::Other),
            other => Err(DomainError::parse(format!("Unknown category: {}", other))),
        }
    }
}

/// A resolved (category, subtype) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Placement {
    pub category: Category,
    pub subtype: &'static str,
}

impl Placement {
    pub const fn new(category: Category, subtype: &'static str) -> Self {
        Self { category, subtype }
    }

    /// Parse a literal category/subtype pair, rejecting anything the store cannot hold.
    pub fn parse(category: &str, subtype: &str) -> Result<Self, DomainError> {
        let category: Category = category.parse()?;
        let subtype = category.find_subtype(subtype).ok_or_else(|| {
            DomainError::parse(format!(
                "Unknown subtype '{}' for category '{}'",
                subtype.trim(),
                category
            ))
        })?;
        Ok(Self { category, subtype })
    }

    pub fn is(&self, category: Category, subtype: &str) -> bool {
        self.category == category && self.subtype == subtype
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.subtype)
    }
}

/// Composite key of a stored stat.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StatKey {
    pub category: Category,
    pub subtype: &'static str,
    pub name: String,
}

impl StatKey {
    pub fn new(placement: Placement, name: impl Into<String>) -> Self {
        Self {
            category: placement.category,
            subtype: placement.subtype,
            name: name.into(),
        }
    }

    /// The key holding the character's splat.
    pub fn splat() -> Self {
        Self::new(Placement::new(Category::Other, subtype::SPLAT), "Splat")
    }

    pub fn lineage(name: impl Into<String>) -> Self {
        Self::new(Placement::new(Category::Identity, subtype::LINEAGE), name)
    }

    pub fn personal(name: impl Into<String>) -> Self {
        Self::new(Placement::new(Category::Identity, subtype::PERSONAL), name)
    }

    pub fn pool(name: impl Into<String>) -> Self {
        Self::new(Placement::new(Category::Pools, subtype::DUAL), name)
    }

    pub fn virtue(name: impl Into<String>) -> Self {
        Self::new(Placement::new(Category::Virtues, subtype::MORAL), name)
    }

    pub fn background(name: impl Into<String>) -> Self {
        Self::new(Placement::new(Category::Backgrounds, subtype::BACKGROUND), name)
    }

    pub fn placement(&self) -> Placement {
        Placement::new(self.category, self.subtype)
    }

    /// Base name without any `(qualifier)` suffix.
    pub fn base_name(&self) -> &str {
        split_instanced(&self.name).0
    }

    pub fn qualifier(&self) -> Option<&str> {
        split_instanced(&self.name).1
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.subtype, self.name)
    }
}

/// Compose the storage name of an instanced stat, e.g. `Language(French)`.
pub fn compose_instanced(name: &str, qualifier: Option<&str>) -> String {
    match qualifier {
        Some(q) => format!("{}({})", name, q),
        None => name.to_string(),
    }
}

/// Split `Name(qualifier)` into its parts. Names without a well-formed suffix
/// are returned whole.
pub fn split_instanced(name: &str) -> (&str, Option<&str>) {
    if let (Some(open), true) = (name.find('('), name.ends_with(')')) {
        let base = &name[..open];
        let qualifier = &name[open + 1..name.len() - 1];
        if !base.is_empty() && !qualifier.is_empty() {
            return (base, Some(qualifier));
        }
    }
    (name, None)
}
