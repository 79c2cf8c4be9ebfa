//! Value objects - Immutable objects defined by their attributes

mod archetype;
mod stat_definition;
mod stat_key;
mod stat_token;
mod stat_value;

pub use archetype::{Archetype, ArchetypeState};
pub use stat_definition::{Instancing, StatDefinition, ValueDomain};
pub use stat_key::{
    compose_instanced, split_instanced, subtype, Category, Placement, StatKey,
};
pub use stat_token::StatToken;
pub use stat_value::{Facet, StatValue, ValueFacets};
