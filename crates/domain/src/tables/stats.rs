//! Attributes, abilities, virtues and backgrounds.

use super::access::{
    Access, CHANGELING, HUNTER, KINAIN, KINFOLK, MAGE, MORTAL_PLUS, SHIFTER, SORCERER, VAMPIRE,
};
use crate::value_objects::subtype::{
    KNOWLEDGE, MENTAL, PHYSICAL, SECONDARY_KNOWLEDGE, SECONDARY_SKILL, SECONDARY_TALENT, SKILL,
    SOCIAL, TALENT,
};

pub const ATTRIBUTES: &[(&str, &str)] = &[
    ("Strength", PHYSICAL),
    ("Dexterity", PHYSICAL),
    ("Stamina", PHYSICAL),
    ("Charisma", SOCIAL),
    ("Manipulation", SOCIAL),
    ("Appearance", SOCIAL),
    ("Perception", MENTAL),
    ("Intelligence", MENTAL),
    ("Wits", MENTAL),
];

pub const ABILITIES: &[(&str, &str)] = &[
    ("Alertness", TALENT),
    ("Athletics", TALENT),
    ("Awareness", TALENT),
    ("Brawl", TALENT),
    ("Empathy", TALENT),
    ("Expression", TALENT),
    ("Intimidation", TALENT),
    ("Kenning", TALENT),
    ("Leadership", TALENT),
    ("Primal-Urge", TALENT),
    ("Streetwise", TALENT),
    ("Subterfuge", TALENT),
    ("Animal Ken", SKILL),
    ("Crafts", SKILL),
    ("Drive", SKILL),
    ("Etiquette", SKILL),
    ("Firearms", SKILL),
    ("Larceny", SKILL),
    ("Melee", SKILL),
    ("Performance", SKILL),
    ("Stealth", SKILL),
    ("Survival", SKILL),
    ("Technology", SKILL),
    ("Academics", KNOWLEDGE),
    ("Computer", KNOWLEDGE),
    ("Enigmas", KNOWLEDGE),
    ("Esoterica", KNOWLEDGE),
    ("Finance", KNOWLEDGE),
    ("Gremayre", KNOWLEDGE),
    ("Investigation", KNOWLEDGE),
    ("Law", KNOWLEDGE),
    ("Medicine", KNOWLEDGE),
    ("Occult", KNOWLEDGE),
    ("Politics", KNOWLEDGE),
    ("Rituals", KNOWLEDGE),
    ("Science", KNOWLEDGE),
];

pub const SECONDARY_ABILITIES: &[(&str, &str)] = &[
    ("Artistry", SECONDARY_TALENT),
    ("Carousing", SECONDARY_TALENT),
    ("Diplomacy", SECONDARY_TALENT),
    ("Intrigue", SECONDARY_TALENT),
    ("Mimicry", SECONDARY_TALENT),
    ("Scrounging", SECONDARY_TALENT),
    ("Seduction", SECONDARY_TALENT),
    ("Style", SECONDARY_TALENT),
    ("Archery", SECONDARY_SKILL),
    ("Demolitions", SECONDARY_SKILL),
    ("Fencing", SECONDARY_SKILL),
    ("Fortune-Telling", SECONDARY_SKILL),
    ("Gambling", SECONDARY_SKILL),
    ("Jury-Rigging", SECONDARY_SKILL),
    ("Pilot", SECONDARY_SKILL),
    ("Torture", SECONDARY_SKILL),
    ("Area Knowledge", SECONDARY_KNOWLEDGE),
    ("Cultural Savvy", SECONDARY_KNOWLEDGE),
    ("Economics", SECONDARY_KNOWLEDGE),
    ("Herbalism", SECONDARY_KNOWLEDGE),
    ("Media", SECONDARY_KNOWLEDGE),
    ("Power-Brokering", SECONDARY_KNOWLEDGE),
    ("Psychology", SECONDARY_KNOWLEDGE),
    ("Theology", SECONDARY_KNOWLEDGE),
];

pub const VIRTUES: &[&str] = &[
    "Conscience",
    "Self-Control",
    "Courage",
    "Conviction",
    "Instinct",
    "Mercy",
    "Vision",
    "Zeal",
];

pub const BACKGROUNDS: &[&str] = &[
    "Allies",
    "Alternate Identity",
    "Arcane",
    "Avatar",
    "Chimera",
    "Contacts",
    "Dreamers",
    "Fame",
    "Fetish",
    "Generation",
    "Herd",
    "Holdings",
    "Influence",
    "Kinfolk",
    "Mentor",
    "Node",
    "Organizational Rank",
    "Pure Breed",
    "Remembrance",
    "Resources",
    "Retainers",
    "Rites",
    "Spirit Heritage",
    "Status",
    "Title",
    "Totem",
    "Treasure",
    "Wonder",
];

pub const RESTRICTED_ABILITIES: &[(&str, &[Access])] = &[
    ("Primal-Urge", &[SHIFTER, KINFOLK]),
    ("Rituals", &[SHIFTER]),
    ("Kenning", &[CHANGELING, KINAIN]),
    ("Gremayre", &[CHANGELING, KINAIN]),
    ("Enigmas", &[MAGE]),
    ("Esoterica", &[MAGE, SORCERER]),
];

pub const RESTRICTED_BACKGROUNDS: &[(&str, &[Access])] = &[
    ("Generation", &[VAMPIRE]),
    ("Herd", &[VAMPIRE]),
    ("Avatar", &[MAGE]),
    ("Node", &[MAGE]),
    ("Arcane", &[MAGE]),
    ("Wonder", &[MAGE]),
    ("Dreamers", &[CHANGELING]),
    ("Chimera", &[CHANGELING]),
    ("Holdings", &[CHANGELING]),
    ("Remembrance", &[CHANGELING]),
    ("Title", &[CHANGELING]),
    ("Treasure", &[CHANGELING]),
    ("Fetish", &[SHIFTER]),
    ("Kinfolk", &[SHIFTER]),
    ("Pure Breed", &[SHIFTER]),
    ("Rites", &[SHIFTER]),
    ("Totem", &[SHIFTER]),
    ("Spirit Heritage", &[SHIFTER]),
];

pub const RESTRICTED_VIRTUES: &[(&str, &[Access])] = &[
    ("Conscience", &[VAMPIRE, MORTAL_PLUS]),
    ("Self-Control", &[VAMPIRE, MORTAL_PLUS]),
    ("Courage", &[VAMPIRE, MORTAL_PLUS]),
    ("Conviction", &[VAMPIRE]),
    ("Instinct", &[VAMPIRE]),
    ("Mercy", &[HUNTER]),
    ("Vision", &[HUNTER]),
    ("Zeal", &[HUNTER]),
];

/// Natures and Demeanors.
pub const PERSONALITY_ARCHETYPES: &[&str] = &[
    "Architect",
    "Autocrat",
    "Bon Vivant",
    "Bravo",
    "Caregiver",
    "Celebrant",
    "Child",
    "Competitor",
    "Conformist",
    "Conniver",
    "Curmudgeon",
    "Deviant",
    "Director",
    "Fanatic",
    "Gallant",
    "Judge",
    "Loner",
    "Martyr",
    "Masochist",
    "Monster",
    "Pedagogue",
    "Penitent",
    "Perfectionist",
    "Rebel",
    "Rogue",
    "Survivor",
    "Thrill-Seeker",
    "Traditionalist",
    "Trickster",
    "Visionary",
];
