//! Who may hold a restricted stat.

use crate::value_objects::{Archetype, ArchetypeState};

/// A splat, optionally narrowed to one sub-archetype (e.g. Mortal+ Ghoul).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub archetype: Archetype,
    pub kind: Option<&'static str>,
}

impl Access {
    pub const fn splat(archetype: Archetype) -> Self {
        Self {
            archetype,
            kind: None,
        }
    }

    pub const fn kind(archetype: Archetype, kind: &'static str) -> Self {
        Self {
            archetype,
            kind: Some(kind),
        }
    }

    pub fn admits(&self, state: &ArchetypeState) -> bool {
        if !state.is(self.archetype) {
            return false;
        }
        match self.kind {
            None => true,
            Some(kind) => state
                .kind()
                .map(|k| k.eq_ignore_ascii_case(kind))
                .unwrap_or(false),
        }
    }

    pub fn label(&self) -> String {
        match self.kind {
            Some(kind) => format!("{} ({})", self.archetype, kind),
            None => self.archetype.to_string(),
        }
    }
}

pub const VAMPIRE: Access = Access::splat(Archetype::Vampire);
pub const SHIFTER: Access = Access::splat(Archetype::Shifter);
pub const MAGE: Access = Access::splat(Archetype::Mage);
pub const CHANGELING: Access = Access::splat(Archetype::Changeling);
pub const HUNTER: Access = Access::splat(Archetype::Hunter);
pub const MORTAL_PLUS: Access = Access::splat(Archetype::MortalPlus);
pub const POSSESSED: Access = Access::splat(Archetype::Possessed);

pub const GHOUL: Access = Access::kind(Archetype::MortalPlus, "Ghoul");
pub const KINFOLK: Access = Access::kind(Archetype::MortalPlus, "Kinfolk");
pub const KINAIN: Access = Access::kind(Archetype::MortalPlus, "Kinain");
pub const SORCERER: Access = Access::kind(Archetype::MortalPlus, "Sorcerer");
pub const PSYCHIC: Access = Access::kind(Archetype::MortalPlus, "Psychic");
pub const FOMORI: Access = Access::kind(Archetype::Possessed, "Fomori");
pub const KAMI: Access = Access::kind(Archetype::Possessed, "Kami");

/// True when any entry of `list` admits the character.
pub fn admitted(list: &[Access], state: &ArchetypeState) -> bool {
    list.iter().any(|a| a.admits(state))
}

/// "Vampire or Mortal+ (Ghoul)"
pub fn describe(list: &[Access]) -> String {
    list.iter()
        .map(Access::label)
        .collect::<Vec<_>>()
        .join(" or ")
}
