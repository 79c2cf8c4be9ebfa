pub mod catalog;
pub mod error;
pub mod ids;
pub mod parser;
pub mod ports;
pub mod resolver;
pub mod rules;
pub mod sheet;
pub mod suggest;
pub mod tables;
pub mod value_objects;

pub use error::{DomainError, ValidationFailure};
pub use ids::CharacterId;

// Re-export ports and their in-memory implementations
pub use catalog::InMemoryCatalog;
pub use ports::{ArchetypeInitializer, AttributeStore, CatalogError, StatCatalog};
pub use sheet::{read_int, read_text, CharacterSheet, NestedSheet, SheetExport};

// Re-export the resolution pipeline
pub use parser::{parse_syntax, ParseError, StatParser};
pub use resolver::{identity_heuristic, Resolution, ResolvedStat, StatResolver};
pub use suggest::SuggestionPolicy;

// Re-export archetype rules
pub use rules::{
    ArchetypeRules, ChangelingRules, DerivedUpdate, HunterRules, MageRules, MortalPlusRules,
    PossessedRules, RuleContext, RulesRegistry, ShifterRules, VampireRules, Verdict,
};

// Re-export value objects
pub use value_objects::{
    compose_instanced, split_instanced, subtype, Archetype, ArchetypeState, Category, Facet,
    Instancing, Placement, StatDefinition, StatKey, StatToken, StatValue, ValueDomain,
    ValueFacets,
};
