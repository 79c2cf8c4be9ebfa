//! Identity fields per splat and the values their lineage fields accept.

use crate::value_objects::subtype::{LINEAGE, PERSONAL};
use crate::value_objects::Archetype;

/// Personal fields every splat carries.
pub const COMMON_IDENTITY: &[(&str, &str)] = &[
    ("Full Name", PERSONAL),
    ("Concept", PERSONAL),
    ("Nature", PERSONAL),
    ("Demeanor", PERSONAL),
    ("Date of Birth", PERSONAL),
    ("Chronicle", PERSONAL),
];

const VAMPIRE_IDENTITY: &[(&str, &str)] = &[
    ("Clan", LINEAGE),
    ("Sire", LINEAGE),
    ("Sect", LINEAGE),
    ("Path of Enlightenment", LINEAGE),
    ("Date of Embrace", PERSONAL),
];

const SHIFTER_IDENTITY: &[(&str, &str)] = &[
    ("Type", LINEAGE),
    ("Breed", LINEAGE),
    ("Auspice", LINEAGE),
    ("Tribe", LINEAGE),
    ("Camp", LINEAGE),
    ("Pack", LINEAGE),
    ("Rank", LINEAGE),
    ("Deed Name", PERSONAL),
    ("Date of First Change", PERSONAL),
];

const MAGE_IDENTITY: &[(&str, &str)] = &[
    ("Affiliation", LINEAGE),
    ("Tradition", LINEAGE),
    ("Tradition Subfaction", LINEAGE),
    ("Convention", LINEAGE),
    ("Methodology", LINEAGE),
    ("Craft", LINEAGE),
    ("Essence", LINEAGE),
    ("Affinity Sphere", LINEAGE),
    ("Cabal", LINEAGE),
    ("Date of Awakening", PERSONAL),
];

const CHANGELING_IDENTITY: &[(&str, &str)] = &[
    ("Kith", LINEAGE),
    ("Seeming", LINEAGE),
    ("House", LINEAGE),
    ("Court", LINEAGE),
    ("Seelie Legacy", LINEAGE),
    ("Unseelie Legacy", LINEAGE),
    ("Motley", LINEAGE),
    ("Fae Name", PERSONAL),
    ("Date of Chrysalis", PERSONAL),
];

const HUNTER_IDENTITY: &[(&str, &str)] = &[
    ("Creed", LINEAGE),
    ("Cell", LINEAGE),
    ("Date of Imbuing", PERSONAL),
];

const MORTAL_PLUS_IDENTITY: &[(&str, &str)] = &[
    ("Type", LINEAGE),
    ("Domitor", LINEAGE),
    ("Tribe", LINEAGE),
    ("Kith", LINEAGE),
    ("Fellowship", LINEAGE),
    ("Faith", LINEAGE),
];

const POSSESSED_IDENTITY: &[(&str, &str)] = &[
    ("Type", LINEAGE),
    ("Possessing Spirit", LINEAGE),
    ("Pack", LINEAGE),
    ("Date of Possession", PERSONAL),
];

/// Splat-specific identity fields (without the common ones).
pub fn identity_fields(archetype: Archetype) -> &'static [(&'static str, &'static str)] {
    match archetype {
        Archetype::Vampire => VAMPIRE_IDENTITY,
        Archetype::Shifter => SHIFTER_IDENTITY,
        Archetype::Mage => MAGE_IDENTITY,
        Archetype::Changeling => CHANGELING_IDENTITY,
        Archetype::Hunter => HUNTER_IDENTITY,
        Archetype::MortalPlus => MORTAL_PLUS_IDENTITY,
        Archetype::Possessed => POSSESSED_IDENTITY,
    }
}

/// Canonical name and subtype of an identity field available to `archetype`.
pub fn find_identity(
    archetype: Archetype,
    name: &str,
) -> Option<(&'static str, &'static str)> {
    let wanted = name.trim();
    COMMON_IDENTITY
        .iter()
        .chain(identity_fields(archetype))
        .find(|(field, _)| field.eq_ignore_ascii_case(wanted))
        .copied()
}

/// Canonical name of `name` if any splat defines it as an identity field.
pub fn any_identity(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    COMMON_IDENTITY
        .iter()
        .chain(Archetype::ALL.iter().flat_map(|a| identity_fields(*a)))
        .map(|(field, _)| *field)
        .find(|field| field.eq_ignore_ascii_case(wanted))
}

/// Splats whose identity tables hold `name`.
pub fn identity_owners(name: &str) -> Vec<Archetype> {
    Archetype::ALL
        .iter()
        .copied()
        .filter(|a| {
            identity_fields(*a)
                .iter()
                .any(|(field, _)| field.eq_ignore_ascii_case(name.trim()))
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Vampire
// -----------------------------------------------------------------------------

pub const CLANS: &[&str] = &[
    "Assamite",
    "Baali",
    "Brujah",
    "Caitiff",
    "Cappadocian",
    "Daughters of Cacophony",
    "Followers of Set",
    "Gangrel",
    "Gargoyle",
    "Giovanni",
    "Kiasyd",
    "Lasombra",
    "Malkavian",
    "Nosferatu",
    "Ravnos",
    "Salubri",
    "Samedi",
    "Toreador",
    "Tremere",
    "True Brujah",
    "Tzimisce",
    "Ventrue",
];

pub const SECTS: &[&str] = &["Camarilla", "Sabbat", "Anarch", "Independent"];

/// Which virtue pair a path of enlightenment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtuePair {
    /// Conscience and Self-Control.
    Conscience,
    /// Conviction and Self-Control.
    ConvictionControl,
    /// Conviction and Instinct.
    Conviction,
}

impl VirtuePair {
    pub fn virtues(&self) -> [&'static str; 2] {
        match self {
            Self::Conscience => ["Conscience", "Self-Control"],
            Self::ConvictionControl => ["Conviction", "Self-Control"],
            Self::Conviction => ["Conviction", "Instinct"],
        }
    }
}

pub const PATHS: &[(&str, VirtuePair)] = &[
    ("Humanity", VirtuePair::Conscience),
    ("Path of Honorable Accord", VirtuePair::Conscience),
    ("Path of Death and the Soul", VirtuePair::ConvictionControl),
    ("Path of Paradox", VirtuePair::ConvictionControl),
    ("Path of Entelechy", VirtuePair::ConvictionControl),
    ("Path of Typhon", VirtuePair::ConvictionControl),
    ("Path of Caine", VirtuePair::Conviction),
    ("Path of Cathari", VirtuePair::Conviction),
    ("Path of Ecstasy", VirtuePair::Conviction),
    ("Path of Evil Revelations", VirtuePair::Conviction),
    ("Path of the Feral Heart", VirtuePair::Conviction),
    ("Path of Lilith", VirtuePair::Conviction),
    ("Path of Metamorphosis", VirtuePair::Conviction),
    ("Path of Night", VirtuePair::Conviction),
    ("Path of Power and the Inner Voice", VirtuePair::Conviction),
];

pub fn path_pair(path: &str) -> Option<VirtuePair> {
    PATHS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(path.trim()))
        .map(|(_, pair)| *pair)
}

// -----------------------------------------------------------------------------
// Shifter
// -----------------------------------------------------------------------------

pub const SHIFTER_TYPES: &[&str] = &[
    "Garou", "Ajaba", "Ananasi", "Bastet", "Corax", "Gurahl", "Kitsune", "Mokole", "Nagah",
    "Nuwisha", "Ratkin", "Rokea",
];

/// Breeds per shifter type, with the starting Gnosis of each.
pub const BREEDS: &[(&str, &[(&str, i32)])] = &[
    ("Garou", &[("Homid", 1), ("Metis", 3), ("Lupus", 5)]),
    ("Ajaba", &[("Homid", 1), ("Metis", 3), ("Hyaenid", 5)]),
    ("Ananasi", &[("Homid", 1), ("Arachnid", 5)]),
    ("Bastet", &[("Homid", 1), ("Metis", 3), ("Feline", 5)]),
    ("Corax", &[("Homid", 1), ("Corvid", 5)]),
    ("Gurahl", &[("Homid", 1), ("Ursine", 5)]),
    ("Kitsune", &[("Kojin", 1), ("Shinju", 3), ("Roko", 5)]),
    ("Mokole", &[("Homid", 1), ("Suchid", 5)]),
    ("Nagah", &[("Balaram", 1), ("Ahi", 3), ("Vasuki", 5)]),
    ("Nuwisha", &[("Homid", 1), ("Latrani", 5)]),
    ("Ratkin", &[("Homid", 1), ("Metis", 3), ("Rodens", 5)]),
    ("Rokea", &[("Homid", 1), ("Squamus", 5)]),
];

/// Auspices per type, with the starting Rage each grants (Garou only).
pub const AUSPICES: &[(&str, &[(&str, Option<i32>)])] = &[
    (
        "Garou",
        &[
            ("Ragabash", Some(1)),
            ("Theurge", Some(2)),
            ("Philodox", Some(3)),
            ("Galliard", Some(4)),
            ("Ahroun", Some(5)),
        ],
    ),
    (
        "Gurahl",
        &[
            ("Arcas", None),
            ("Uzmati", None),
            ("Kojubat", None),
            ("Kieh", None),
            ("Rishi", None),
        ],
    ),
    ("Ajaba", &[("Dawn", None), ("Midnight", None), ("Dusk", None)]),
    (
        "Kitsune",
        &[
            ("Kataribe", None),
            ("Gukutsushi", None),
            ("Doshi", None),
            ("Eji", None),
        ],
    ),
    (
        "Nagah",
        &[
            ("Kamakshi", None),
            ("Kartikeya", None),
            ("Kamsa", None),
            ("Kali", None),
        ],
    ),
    (
        "Ratkin",
        &[
            ("Tunnel Runner", None),
            ("Shadow Seer", None),
            ("Knife Skulker", None),
            ("Warrior", None),
        ],
    ),
];

/// Tribes per type, with the starting Willpower each grants (Garou only).
pub const TRIBES: &[(&str, &[(&str, Option<i32>)])] = &[
    (
        "Garou",
        &[
            ("Black Furies", Some(3)),
            ("Bone Gnawers", Some(4)),
            ("Children of Gaia", Some(4)),
            ("Fianna", Some(3)),
            ("Get of Fenris", Some(3)),
            ("Glass Walkers", Some(3)),
            ("Red Talons", Some(3)),
            ("Shadow Lords", Some(3)),
            ("Silent Striders", Some(3)),
            ("Silver Fangs", Some(3)),
            ("Stargazers", Some(4)),
            ("Uktena", Some(3)),
            ("Wendigo", Some(4)),
        ],
    ),
    (
        "Bastet",
        &[
            ("Bagheera", None),
            ("Balam", None),
            ("Bubasti", None),
            ("Ceilican", None),
            ("Khan", None),
            ("Pumonca", None),
            ("Qualmi", None),
            ("Simba", None),
            ("Swara", None),
        ],
    ),
    ("Ananasi", &[("Tenere", None), ("Hatar", None), ("Kumoti", None)]),
];

/// Camps per Garou tribe.
pub const CAMPS: &[(&str, &[&str])] = &[
    ("Black Furies", &["Amazons of Diana", "Bacchantes", "Freebooters"]),
    ("Bone Gnawers", &["Frate Ludovico", "Rat Finks", "The Swarm"]),
    ("Children of Gaia", &["Imminent Rebirth", "Patient Deed", "Unicorn's Children"]),
    ("Fianna", &["Grey Fleet", "Songkeepers", "Tir Tairngire"]),
    ("Get of Fenris", &["Fangs of Garm", "Glorious Fist of Wotan", "Valkyria"]),
    ("Glass Walkers", &["Corporate Wolves", "Cyber Dogs", "Random Interrupts", "Wise Guys"]),
    ("Red Talons", &["Lodge of the Predator Kings", "Whelp's Curse"]),
    ("Shadow Lords", &["Bringers of Light", "Children of Crow", "Lords of the Summit"]),
    ("Silent Striders", &["Harbingers", "Seekers", "Wayfarers"]),
    ("Silver Fangs", &["Renewal", "Masters of the Evening", "Warders of Men"]),
    ("Stargazers", &["Cult of the Broken Mirror", "Tears of the Dragon"]),
    ("Uktena", &["Keepers of the Source", "Ogre-Breakers", "Secret Searchers"]),
    ("Wendigo", &["Ghost Dancers", "Sun Dancers", "Warrior's Way"]),
];

/// Values listed for `key` in a keyed table, case-insensitively.
pub fn keyed<'a, T>(table: &'a [(&'static str, T)], key: &str) -> Option<&'a T> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key.trim()))
        .map(|(_, v)| v)
}

// -----------------------------------------------------------------------------
// Mage
// -----------------------------------------------------------------------------

pub const AFFILIATIONS: &[&str] = &["Traditions", "Technocracy", "Disparates"];

pub const TRADITIONS: &[(&str, &[&str])] = &[
    (
        "Akashic Brotherhood",
        &["Chabnagpa", "Jnani", "Li-Hai", "Shaolin", "Vajrapani", "Wu Lung"],
    ),
    (
        "Celestial Chorus",
        &["Alexandrian Society", "Anchorites", "Monists", "Poimandres"],
    ),
    (
        "Cult of Ecstasy",
        &["Acharne", "Aghoris", "Children of Kneph", "Freewheelers", "Vratyas"],
    ),
    (
        "Dreamspeakers",
        &["Baruti", "Four Winds", "Ghost Wheel Society", "Keepers of the Sacred Fire", "Red Spear Society"],
    ),
    (
        "Euthanatos",
        &["Aided", "Chakravanti", "Golden Chalice", "Lhaksmists", "Madzimbabwe", "Pomegranate Deme"],
    ),
    (
        "Order of Hermes",
        &["House Bonisagus", "House Ex Miscellanea", "House Flambeau", "House Fortunae", "House Quaesitor", "House Shaea", "House Tytalus", "House Verditius"],
    ),
    (
        "Society of Ether",
        &["Cybernauts", "Ethernauts", "Mad Scientists", "Utopians"],
    ),
    (
        "Verbena",
        &["Gardeners of the Tree", "Lifeweavers", "Moon-Seekers", "Twisters of Fate"],
    ),
    (
        "Virtual Adepts",
        &["Chaoticians", "Cypherpunks", "Mediaminds", "Reality Hackers"],
    ),
    ("Hollow Ones", &[]),
];

pub const CONVENTIONS: &[(&str, &[&str])] = &[
    (
        "Iteration X",
        &["BioMechanics", "Macrotechnicians", "Statisticians", "Time-Motion Managers"],
    ),
    (
        "New World Order",
        &["Ivory Tower", "Operatives", "The Feed", "Watchers"],
    ),
    (
        "Progenitors",
        &["FACADE Engineers", "Genegineers", "Pharmacopeists"],
    ),
    (
        "Syndicate",
        &["Disbursements", "Enforcers", "Financiers", "Media Control"],
    ),
    (
        "Void Engineers",
        &["Border Corps Division", "Earth Frontier Division", "Pan-Dimensional Corps", "Research & Execution"],
    ),
];

pub const CRAFTS: &[&str] = &[
    "Ahl-i-Batin",
    "Bata'a",
    "Children of Knowledge",
    "Kopa Loei",
    "Ngoma",
    "Orphans",
    "Sisters of Hippolyta",
    "Taftani",
    "Templar Knights",
];

pub const ESSENCES: &[&str] = &["Dynamic", "Pattern", "Primordial", "Questing"];

// -----------------------------------------------------------------------------
// Changeling
// -----------------------------------------------------------------------------

/// Kiths with their Banality baseline.
pub const KITHS: &[(&str, i32)] = &[
    ("Boggan", 3),
    ("Clurichaun", 3),
    ("Eshu", 4),
    ("Inanimae", 2),
    ("Nocker", 5),
    ("Nunnehi", 3),
    ("Pooka", 3),
    ("Redcap", 3),
    ("Satyr", 3),
    ("Selkie", 3),
    ("Sidhe", 4),
    ("Sluagh", 3),
    ("Troll", 3),
];

pub const SEEMINGS: &[&str] = &["Childling", "Wilder", "Grump"];

pub const COURTS: &[&str] = &["Seelie", "Unseelie"];

pub const HOUSES: &[&str] = &[
    "Aesin", "Ailil", "Balor", "Beaumayn", "Daireann", "Dougal", "Eiluned", "Fiona", "Gwydion",
    "Leanhaun", "Liam", "Scathach", "Varich",
];

pub const SEELIE_LEGACIES: &[&str] = &[
    "Arcadian",
    "Bumpkin",
    "Crafter",
    "Dandy",
    "Hermit",
    "Orchid",
    "Paladin",
    "Panderer",
    "Regent",
    "Sage",
    "Saint",
    "Squire",
    "Troubadour",
    "Wayfarer",
];

pub const UNSEELIE_LEGACIES: &[&str] = &[
    "Beast",
    "Fatalist",
    "Fool",
    "Grotesque",
    "Knave",
    "Outlaw",
    "Pandora",
    "Peacock",
    "Rake",
    "Riddler",
    "Ringleader",
    "Rogue",
    "Savage",
    "Wretch",
];

// -----------------------------------------------------------------------------
// Hunter, Mortal+, Possessed
// -----------------------------------------------------------------------------

/// Creeds with their primary virtue.
pub const CREEDS: &[(&str, &str)] = &[
    ("Avenger", "Zeal"),
    ("Defender", "Zeal"),
    ("Wayward", "Zeal"),
    ("Hermit", "Vision"),
    ("Judge", "Vision"),
    ("Visionary", "Vision"),
    ("Innocent", "Mercy"),
    ("Martyr", "Mercy"),
    ("Redeemer", "Mercy"),
];

pub const MORTAL_PLUS_TYPES: &[&str] = &[
    "Ghoul", "Kinfolk", "Kinain", "Sorcerer", "Psychic", "Faithful",
];

pub const POSSESSED_TYPES: &[&str] = &["Fomori", "Kami"];

/// Valid sub-archetype values for a splat.
pub fn kinds(archetype: Archetype) -> Vec<&'static str> {
    match archetype {
        Archetype::Vampire => CLANS.to_vec(),
        Archetype::Shifter => SHIFTER_TYPES.to_vec(),
        Archetype::Mage => AFFILIATIONS.to_vec(),
        Archetype::Changeling => KITHS.iter().map(|(k, _)| *k).collect(),
        Archetype::Hunter => CREEDS.iter().map(|(c, _)| *c).collect(),
        Archetype::MortalPlus => MORTAL_PLUS_TYPES.to_vec(),
        Archetype::Possessed => POSSESSED_TYPES.to_vec(),
    }
}
