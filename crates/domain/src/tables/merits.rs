//! Merits and flaws with their point costs.

use crate::value_objects::subtype::{MENTAL, PHYSICAL, SOCIAL, SUPERNATURAL};
use crate::value_objects::{Archetype, Instancing};

/// A merit or flaw: its subtype, point cost range, instancing and the splats
/// that may take it (empty means everyone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitCost {
    pub name: &'static str,
    pub subtype: &'static str,
    pub min: i32,
    pub max: i32,
    pub instancing: Instancing,
    pub restriction: &'static [Archetype],
}

impl TraitCost {
    const fn new(name: &'static str, subtype: &'static str, min: i32, max: i32) -> Self {
        Self {
            name,
            subtype,
            min,
            max,
            instancing: Instancing::Forbidden,
            restriction: &[],
        }
    }

    const fn fixed(name: &'static str, subtype: &'static str, cost: i32) -> Self {
        Self::new(name, subtype, cost, cost)
    }

    const fn required(self) -> Self {
        Self {
            instancing: Instancing::Required,
            ..self
        }
    }

    const fn optional(self) -> Self {
        Self {
            instancing: Instancing::Optional,
            ..self
        }
    }

    const fn only(self, restriction: &'static [Archetype]) -> Self {
        Self {
            restriction,
            ..self
        }
    }
}

const VAMPIRE_ONLY: &[Archetype] = &[Archetype::Vampire];
const MAGE_ONLY: &[Archetype] = &[Archetype::Mage];
const SHIFTER_ONLY: &[Archetype] = &[Archetype::Shifter];
const CHANGELING_ONLY: &[Archetype] = &[Archetype::Changeling];
const MORTAL_PLUS_ONLY: &[Archetype] = &[Archetype::MortalPlus];

pub const MERITS: &[TraitCost] = &[
    TraitCost::fixed("Acute Sense", PHYSICAL, 1).required(),
    TraitCost::fixed("Ambidextrous", PHYSICAL, 1),
    TraitCost::fixed("Blush of Health", PHYSICAL, 2).only(VAMPIRE_ONLY),
    TraitCost::fixed("Catlike Balance", PHYSICAL, 1),
    TraitCost::fixed("Daredevil", PHYSICAL, 3),
    TraitCost::fixed("Efficient Digestion", PHYSICAL, 3).only(VAMPIRE_ONLY),
    TraitCost::fixed("Huge Size", PHYSICAL, 4),
    TraitCost::fixed("Enchanting Voice", SOCIAL, 2),
    TraitCost::fixed("Natural Leader", SOCIAL, 1),
    TraitCost::fixed("Prestigious Sire", SOCIAL, 1).only(VAMPIRE_ONLY),
    TraitCost::new("Reputation", SOCIAL, 2, 3).optional(),
    TraitCost::fixed("Pure Breed Heritage", SOCIAL, 2).only(SHIFTER_ONLY),
    TraitCost::fixed("Common Sense", MENTAL, 1),
    TraitCost::fixed("Code of Honor", MENTAL, 2),
    TraitCost::fixed("Concentration", MENTAL, 1),
    TraitCost::fixed("Eidetic Memory", MENTAL, 2),
    TraitCost::fixed("Iron Will", MENTAL, 3),
    TraitCost::fixed("Language", MENTAL, 1).required(),
    TraitCost::fixed("Light Sleeper", MENTAL, 2),
    TraitCost::fixed("Time Sense", MENTAL, 1),
    TraitCost::fixed("Additional Discipline", SUPERNATURAL, 5)
        .required()
        .only(VAMPIRE_ONLY),
    TraitCost::fixed("Avatar Companion", SUPERNATURAL, 3).only(MAGE_ONLY),
    TraitCost::fixed("Danger Sense", SUPERNATURAL, 2),
    TraitCost::fixed("Fae Blood", SUPERNATURAL, 4).only(MORTAL_PLUS_ONLY),
    TraitCost::new("Gnosis", SUPERNATURAL, 5, 7).only(MORTAL_PLUS_ONLY),
    TraitCost::fixed("Luck", SUPERNATURAL, 3),
    TraitCost::fixed("Magic Resistance", SUPERNATURAL, 2),
    TraitCost::fixed("Medium", SUPERNATURAL, 2),
    TraitCost::fixed("Oracular Ability", SUPERNATURAL, 3),
    TraitCost::fixed("Spirit Mentor", SUPERNATURAL, 3),
    TraitCost::fixed("True Faith", SUPERNATURAL, 7),
    TraitCost::fixed("Unbondable", SUPERNATURAL, 3).only(VAMPIRE_ONLY),
];

pub const FLAWS: &[TraitCost] = &[
    TraitCost::new("Addiction", PHYSICAL, 1, 3).required(),
    TraitCost::new("Bad Sight", PHYSICAL, 1, 3),
    TraitCost::fixed("Deformity", PHYSICAL, 3),
    TraitCost::fixed("Lame", PHYSICAL, 3),
    TraitCost::fixed("Mute", PHYSICAL, 4),
    TraitCost::fixed("One Arm", PHYSICAL, 3),
    TraitCost::fixed("Permanent Wound", PHYSICAL, 3).only(VAMPIRE_ONLY),
    TraitCost::fixed("Repulsed by Garlic", PHYSICAL, 1).only(VAMPIRE_ONLY),
    TraitCost::fixed("Short", PHYSICAL, 1),
    TraitCost::fixed("Dark Secret", SOCIAL, 1),
    TraitCost::new("Enemy", SOCIAL, 1, 5).optional(),
    TraitCost::fixed("Infamous Sire", SOCIAL, 1).only(VAMPIRE_ONLY),
    TraitCost::fixed("Sire's Resentment", SOCIAL, 1).only(VAMPIRE_ONLY),
    TraitCost::fixed("Twisted Upbringing", SOCIAL, 1).only(CHANGELING_ONLY),
    TraitCost::fixed("Amnesia", MENTAL, 2),
    TraitCost::fixed("Derangement", MENTAL, 2).required(),
    TraitCost::fixed("Intolerance", MENTAL, 1).required(),
    TraitCost::fixed("Nightmares", MENTAL, 1),
    TraitCost::fixed("Overconfident", MENTAL, 1),
    TraitCost::fixed("Phobia", MENTAL, 2).required(),
    TraitCost::fixed("Shy", MENTAL, 1),
    TraitCost::fixed("Soft-Hearted", MENTAL, 1),
    TraitCost::new("Cursed", SUPERNATURAL, 1, 5).optional(),
    TraitCost::fixed("Dark Fate", SUPERNATURAL, 5),
    TraitCost::fixed("Eerie Presence", SUPERNATURAL, 2),
    TraitCost::fixed("Haunted", SUPERNATURAL, 3),
    TraitCost::fixed("Sphere Inept", SUPERNATURAL, 5)
        .required()
        .only(MAGE_ONLY),
];

fn find(list: &'static [TraitCost], name: &str) -> Option<&'static TraitCost> {
    let wanted = name.trim();
    list.iter().find(|t| t.name.eq_ignore_ascii_case(wanted))
}

pub fn find_merit(name: &str) -> Option<&'static TraitCost> {
    find(MERITS, name)
}

pub fn find_flaw(name: &str) -> Option<&'static TraitCost> {
    find(FLAWS, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case_and_keep_canonical_name() {
        let merit = find_merit("iron will").expect("known merit");
        assert_eq!(merit.name, "Iron Will");
        assert_eq!((merit.min, merit.max), (3, 3));

        let flaw = find_flaw("PHOBIA").expect("known flaw");
        assert_eq!(flaw.instancing, Instancing::Required);
        assert!(find_merit("Phobia").is_none());
    }

    #[test]
    fn names_are_unique_within_each_list() {
        for list in [MERITS, FLAWS] {
            for (i, a) in list.iter().enumerate() {
                assert!(
                    list[i + 1..].iter().all(|b| !b.name.eq_ignore_ascii_case(a.name)),
                    "duplicate entry {}",
                    a.name
                );
            }
        }
    }
}
