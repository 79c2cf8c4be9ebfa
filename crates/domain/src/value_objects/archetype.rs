//! Character archetypes ("splats") and the archetype state read from a sheet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::stat_key::{subtype, Category, StatKey};
use super::stat_value::Facet;
use crate::error::DomainError;
use crate::ports::AttributeStore;

/// The character's top-level kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Vampire,
    Shifter,
    Mage,
    Changeling,
    Hunter,
    #[serde(rename = "Mortal+")]
    MortalPlus,
    Possessed,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Self::Vampire,
        Self::Shifter,
        Self::Mage,
        Self::Changeling,
        Self::Hunter,
        Self::MortalPlus,
        Self::Possessed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vampire => "Vampire",
            Self::Shifter => "Shifter",
            Self::Mage => "Mage",
            Self::Changeling => "Changeling",
            Self::Hunter => "Hunter",
            Self::MortalPlus => "Mortal+",
            Self::Possessed => "Possessed",
        }
    }

    /// Identity field holding this splat's sub-archetype.
    pub fn subtype_field(&self) -> &'static str {
        match self {
            Self::Vampire => "Clan",
            Self::Shifter | Self::MortalPlus | Self::Possessed => "Type",
            Self::Mage => "Affiliation",
            Self::Changeling => "Kith",
            Self::Hunter => "Creed",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.as_str()).collect()
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vampire" => Ok(Self::Vampire),
            "shifter" => Ok(Self::Shifter),
            "mage" => Ok(Self::Mage),
            "changeling" => Ok(Self::Changeling),
            "hunter" => Ok(Self::Hunter),
            "mortal+" | "mortal plus" | "mortalplus" => Ok(Self::MortalPlus),
            "possessed" => Ok(Self::Possessed),
            other => Err(DomainError::parse(format!("Unknown splat: {}", other))),
        }
    }
}

/// Archetype-relevant facts about a character, read from its sheet.
///
/// Not stored separately: rebuilt from `other/splat/Splat` and the
/// `identity/lineage` fields whenever a decision needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchetypeState {
    pub archetype: Option<Archetype>,
    lineage: BTreeMap<String, String>,
}

impl ArchetypeState {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype: Some(archetype),
            lineage: BTreeMap::new(),
        }
    }

    /// State of a character with no splat.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn with_lineage(mut self, field: &str, value: &str) -> Self {
        self.lineage.insert(field.to_string(), value.to_string());
        self
    }

    pub fn from_store(store: &dyn AttributeStore) -> Self {
        let archetype = store
            .get(&StatKey::splat(), Facet::Permanent)
            .and_then(|v| v.as_text().and_then(|s| s.parse().ok()));

        let lineage = store
            .keys()
            .into_iter()
            .filter(|k| k.category == Category::Identity && k.subtype == subtype::LINEAGE)
            .filter_map(|k| {
                let value = store.get(&k, Facet::Permanent)?;
                let text = value.to_string();
                if text.trim().is_empty() {
                    None
                } else {
                    Some((k.name, text))
                }
            })
            .collect();

        Self { archetype, lineage }
    }

    /// Value of an `identity/lineage` field, matched case-insensitively.
    pub fn lineage(&self, field: &str) -> Option<&str> {
        self.lineage
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v.as_str())
    }

    /// The sub-archetype (clan, shifter type, affiliation, …).
    pub fn kind(&self) -> Option<&str> {
        self.archetype.and_then(|a| self.lineage(a.subtype_field()))
    }

    pub fn is(&self, archetype: Archetype) -> bool {
        self.archetype == Some(archetype)
    }

    pub fn is_kind(&self, archetype: Archetype, kind: &str) -> bool {
        self.is(archetype)
            && self
                .kind()
                .map(|k| k.eq_ignore_ascii_case(kind))
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CharacterSheet;
    use crate::value_objects::StatValue;

    #[test]
    fn archetype_from_str_is_case_insensitive() {
        assert_eq!("VAMPIRE".parse::<Archetype>(), Ok(Archetype::Vampire));
        assert_eq!("mortal+".parse::<Archetype>(), Ok(Archetype::MortalPlus));
        assert!("Demon".parse::<Archetype>().is_err());
    }

    #[test]
    fn state_reads_splat_and_lineage() {
        let mut sheet = CharacterSheet::new();
        sheet.set_uniform(StatKey::splat(), StatValue::text("Shifter"));
        sheet.set_uniform(StatKey::lineage("Type"), StatValue::text("Garou"));
        sheet.set_uniform(StatKey::lineage("Tribe"), StatValue::text("Fianna"));

        let state = ArchetypeState::from_store(&sheet);
        assert_eq!(state.archetype, Some(Archetype::Shifter));
        assert_eq!(state.kind(), Some("Garou"));
        assert_eq!(state.lineage("tribe"), Some("Fianna"));
        assert!(state.is_kind(Archetype::Shifter, "garou"));
    }

    #[test]
    fn empty_sheet_has_no_archetype() {
        let sheet = CharacterSheet::new();
        let state = ArchetypeState::from_store(&sheet);
        assert_eq!(state, ArchetypeState::unset());
        assert_eq!(state.kind(), None);
    }
}
