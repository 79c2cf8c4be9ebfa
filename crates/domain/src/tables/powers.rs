//! Supernatural power families.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use super::access::{
    Access, CHANGELING, FOMORI, GHOUL, HUNTER, KAMI, KINAIN, KINFOLK, MAGE, PSYCHIC, SHIFTER,
    SORCERER, VAMPIRE,
};
use crate::value_objects::{subtype, Archetype, ArchetypeState};

pub const DISCIPLINES: &[&str] = &[
    "Animalism",
    "Auspex",
    "Celerity",
    "Chimerstry",
    "Daimoinon",
    "Dementation",
    "Dominate",
    "Fortitude",
    "Melpominee",
    "Mytherceria",
    "Necromancy",
    "Obeah",
    "Obfuscate",
    "Obtenebration",
    "Potence",
    "Presence",
    "Protean",
    "Quietus",
    "Serpentis",
    "Spiritus",
    "Temporis",
    "Thanatosis",
    "Thaumaturgy",
    "Valeren",
    "Vicissitude",
    "Visceratika",
];

pub const COMBODISCIPLINES: &[&str] = &[
    "Armor of Caine's Fury",
    "Burning Wrath",
    "Iron Heart",
    "Quicken Sight",
    "Unseen Fortification",
];

pub const THAUMATURGY_PATHS: &[&str] = &[
    "Elemental Mastery",
    "Gift of Morpheus",
    "Hands of Destruction",
    "Lure of Flames",
    "Movement of the Mind",
    "Neptune's Might",
    "Path of Blood",
    "Path of Conjuring",
    "Path of Corruption",
    "Path of Mars",
    "Path of Technomancy",
    "Path of the Father's Vengeance",
    "Weather Control",
];

pub const NECROMANCY_PATHS: &[&str] = &[
    "Ash Path",
    "Bone Path",
    "Cenotaph Path",
    "Mortis Path",
    "Sepulchre Path",
    "Vitreous Path",
];

pub const HEDGE_MAGIC_PATHS: &[&str] = &[
    "Alchemy",
    "Conjuration",
    "Conveyance",
    "Divination",
    "Enchantment",
    "Fascination",
    "Healing",
    "Hellfire",
    "Shadowcasting",
    "Summoning, Binding and Warding",
    "Weather Control",
];

pub const NUMINA: &[&str] = &[
    "Animal Psychics",
    "Astral Projection",
    "Channeling",
    "Clairvoyance",
    "Cyberkinesis",
    "Ectoplasmic Generation",
    "Mind Shields",
    "Psychic Healing",
    "Psychic Invisibility",
    "Psychokinesis",
    "Pyrokinesis",
    "Telepathy",
];

pub const RITES: &[&str] = &[
    "Baptism of Fire",
    "Gathering for the Departed",
    "Moot Rite",
    "Rite of Binding",
    "Rite of Cleansing",
    "Rite of Contrition",
    "Rite of Passage",
    "Rite of Spirit Awakening",
    "Rite of Talisman Dedication",
    "Rite of the Fetish",
    "Rite of the Opened Caern",
    "Rite of Wounding",
];

pub const SPHERES: &[&str] = &[
    "Correspondence",
    "Entropy",
    "Forces",
    "Life",
    "Matter",
    "Mind",
    "Prime",
    "Spirit",
    "Time",
];

/// Technocratic sphere names and the traditional sphere each replaces.
pub const TECHNOCRACY_SPHERES: &[(&str, &str)] = &[
    ("Data", "Correspondence"),
    ("Primal Utility", "Prime"),
    ("Dimensional Science", "Spirit"),
];

pub const ARTS: &[&str] = &[
    "Autumn",
    "Chicanery",
    "Chronos",
    "Contract",
    "Dragon's Ire",
    "Legerdemain",
    "Metamorphosis",
    "Naming",
    "Oneiromancy",
    "Primal",
    "Pyretics",
    "Skycraft",
    "Soothsay",
    "Sovereign",
    "Wayfare",
];

pub const REALMS: &[&str] = &["Actor", "Fae", "Nature", "Prop", "Scene", "Time"];

/// Edges per creed.
pub const EDGES: &[(&str, &[&str])] = &[
    ("Avenger", &["Cleave", "Trample", "Burn", "Smite"]),
    ("Defender", &["Ward", "Rejuvenate", "Brand", "Champion"]),
    ("Wayward", &["Impart", "Smother", "Surge"]),
    ("Hermit", &["Cognizance", "Illustrate", "Transfigure"]),
    ("Judge", &["Discern", "Burden", "Expose", "Pronounce"]),
    ("Visionary", &["Foresee", "Pinpoint", "Delve"]),
    ("Innocent", &["Hide", "Illuminate", "Radiate", "Confront"]),
    ("Martyr", &["Demand", "Witness", "Ravage", "Donate"]),
    ("Redeemer", &["Bluster", "Insinuate", "Respire", "Exorcise"]),
];

pub const BLESSINGS: &[&str] = &[
    "Armored Hide",
    "Berserker",
    "Body Barbs",
    "Claws and Fangs",
    "Extra Limbs",
    "Gills",
    "Immunity to the Delirium",
    "Mega-Attribute",
    "Nauseating Presence",
    "Poison Tongue",
    "Regeneration",
    "Toxic Breath",
    "Wall Walking",
];

pub const CHARMS: &[&str] = &[
    "Airt Sense",
    "Calm",
    "Cleanse the Blight",
    "Healing Touch",
    "Peek",
    "Re-form",
    "Spirit Sight",
];

/// Gifts per owner. An owner is a shifter type, breed, auspice or tribe.
pub const GIFTS: &[(&str, &[&str])] = &[
    ("Homid", &["Master of Fire", "Persuasion", "Smell of Man"]),
    ("Metis", &["Create Element", "Primal Anger", "Sense Wyrm", "Shed"]),
    ("Lupus", &["Hare's Leap", "Heightened Senses", "Prey Mind", "Sense Prey"]),
    ("Ragabash", &["Blur of the Milky Eye", "Open Seal", "Scent of Running Water"]),
    ("Theurge", &["Mother's Touch", "Sense Wyrm", "Spirit Speech"]),
    ("Philodox", &["Resist Pain", "Scent of the True Form", "Truth of Gaia"]),
    ("Galliard", &["Beast Speech", "Call of the Wyld", "Mindspeak"]),
    ("Ahroun", &["Falling Touch", "Inspiration", "Razor Claws"]),
    ("Black Furies", &["Breath of the Wyld", "Heightened Senses", "Sense Wyrm"]),
    ("Bone Gnawers", &["Cooking", "Resist Toxin", "Scent of Sweet Honey"]),
    ("Children of Gaia", &["Mercy", "Mother's Touch", "Resist Pain"]),
    ("Fianna", &["Faerie Light", "Persuasion", "Resist Toxin"]),
    ("Get of Fenris", &["Razor Claws", "Resist Pain", "Visage of Fenris"]),
    ("Glass Walkers", &["Control Simple Machine", "Cybersenses", "Diagnostics", "Trick Shot"]),
    ("Red Talons", &["Beast Speech", "Scent of Running Water", "Wolf at the Door"]),
    ("Shadow Lords", &["Aura of Confidence", "Fatal Flaw", "Seizing the Edge"]),
    ("Silent Striders", &["Sense Wyrm", "Silence", "Speed of Thought"]),
    ("Silver Fangs", &["Falcon's Grasp", "Lambent Flame", "Sense Wyrm"]),
    ("Stargazers", &["Balance", "Inner Strength", "Sense Wyrm"]),
    ("Uktena", &["Sense Magic", "Shroud", "Spirit of the Fray"]),
    ("Wendigo", &["Call the Breeze", "Camouflage", "Resist Pain"]),
    ("Bastet", &["Catfeet", "Razor Claws", "Sense Prey"]),
    ("Corax", &["Enemy Ways", "Eyes of the Cat", "Voice of the Mimic"]),
    ("Gurahl", &["Spirit Friend", "Ursa's Light"]),
    ("Rokea", &["Salt Water's Grace", "Sense the Deep"]),
    ("Ratkin", &["Gnaw", "Squeeze"]),
    ("Nuwisha", &["Blissful Ignorance", "Laughing Wind"]),
];

/// Every gift name mapped (lower-cased) to its canonical spelling and owners.
static GIFT_OWNERS: Lazy<BTreeMap<String, (&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    let mut map: BTreeMap<String, (&'static str, Vec<&'static str>)> = BTreeMap::new();
    for (owner, gifts) in GIFTS {
        for gift in *gifts {
            map.entry(gift.to_lowercase())
                .or_insert_with(|| (*gift, Vec::new()))
                .1
                .push(*owner);
        }
    }
    map
});

/// Canonical gift name and the owners that teach it.
pub fn gift(name: &str) -> Option<(&'static str, &'static [&'static str])> {
    GIFT_OWNERS
        .get(&name.trim().to_lowercase())
        .map(|(canonical, owners)| (*canonical, owners.as_slice()))
}

/// Whether the character's type, breed, auspice or tribe teaches a gift.
/// Kinfolk learn Homid gifts and those of their tribe.
pub fn gift_owned(owners: &[&str], state: &ArchetypeState) -> bool {
    let mut holders: Vec<&str> = ["Type", "Breed", "Auspice", "Tribe"]
        .iter()
        .filter_map(|field| state.lineage(field))
        .collect();
    if state.is_kind(Archetype::MortalPlus, "Kinfolk") {
        holders.push("Homid");
    }
    owners
        .iter()
        .any(|owner| holders.iter().any(|h| h.eq_ignore_ascii_case(owner)))
}

/// Canonical edge name and the creeds that grant it.
pub fn edge(name: &str) -> Option<(&'static str, Vec<&'static str>)> {
    let wanted = name.trim();
    let mut canonical = None;
    let mut creeds = Vec::new();
    for (creed, edges) in EDGES {
        if let Some(found) = edges.iter().find(|e| e.eq_ignore_ascii_case(wanted)) {
            canonical = Some(*found);
            creeds.push(*creed);
        }
    }
    canonical.map(|c| (c, creeds))
}

/// Names defined for a power subtype.
pub fn power_names(power: &str) -> Vec<&'static str> {
    match power {
        subtype::DISCIPLINE => DISCIPLINES.to_vec(),
        subtype::COMBODISCIPLINE => COMBODISCIPLINES.to_vec(),
        subtype::THAUMATURGY => THAUMATURGY_PATHS.to_vec(),
        subtype::NECROMANCY => NECROMANCY_PATHS.to_vec(),
        subtype::HEDGE_MAGIC => HEDGE_MAGIC_PATHS.to_vec(),
        subtype::NUMINA => NUMINA.to_vec(),
        subtype::GIFT => GIFT_OWNERS.values().map(|(name, _)| *name).collect(),
        subtype::RITE => RITES.to_vec(),
        subtype::SPHERE => SPHERES
            .iter()
            .copied()
            .chain(TECHNOCRACY_SPHERES.iter().map(|(name, _)| *name))
            .collect(),
        subtype::ART => ARTS.to_vec(),
        subtype::REALM => REALMS.to_vec(),
        subtype::EDGE => EDGES.iter().flat_map(|(_, e)| e.iter().copied()).collect(),
        subtype::BLESSING => BLESSINGS.to_vec(),
        subtype::CHARM => CHARMS.to_vec(),
        _ => Vec::new(),
    }
}

/// Canonical spelling of `name` within one power subtype.
pub fn find_power(power: &str, name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    power_names(power)
        .into_iter()
        .find(|p| p.eq_ignore_ascii_case(wanted))
}

/// Who may hold powers of a subtype.
pub fn power_access(power: &str) -> &'static [Access] {
    match power {
        subtype::DISCIPLINE => &[VAMPIRE, GHOUL],
        subtype::COMBODISCIPLINE | subtype::THAUMATURGY | subtype::NECROMANCY => &[VAMPIRE],
        subtype::HEDGE_MAGIC => &[SORCERER],
        subtype::NUMINA => &[PSYCHIC, SORCERER],
        subtype::GIFT => &[SHIFTER, KINFOLK],
        subtype::RITE => &[SHIFTER],
        subtype::SPHERE => &[MAGE],
        subtype::ART | subtype::REALM => &[CHANGELING, KINAIN],
        subtype::EDGE => &[HUNTER],
        subtype::BLESSING => &[FOMORI],
        subtype::CHARM => &[KAMI],
        _ => &[],
    }
}
