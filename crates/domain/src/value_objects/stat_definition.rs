//! Catalog stat definitions - immutable reference data owned by the catalog.

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;
use super::stat_key::{Category, Placement};
use crate::error::DomainError;

/// Whether a stat carries an instance qualifier, e.g. `Language(French)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instancing {
    Required,
    Forbidden,
    #[default]
    Optional,
}

/// Values a stat accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValueDomain {
    Numeric { min: i32, max: i32 },
    Enumerated { values: Vec<String> },
    FreeText,
}

/// A canonical stat definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDefinition {
    pub name: String,
    pub category: Category,
    pub subtype: String,
    pub value_domain: ValueDomain,
    #[serde(default)]
    pub instancing: Instancing,
    #[serde(default)]
    pub archetype_restriction: Option<Vec<Archetype>>,
}

impl StatDefinition {
    pub fn numeric(
        name: impl Into<String>,
        placement: Placement,
        min: i32,
        max: i32,
        instancing: Instancing,
    ) -> Self {
        Self {
            name: name.into(),
            category: placement.category,
            subtype: placement.subtype.to_string(),
            value_domain: ValueDomain::Numeric { min, max },
            instancing,
            archetype_restriction: None,
        }
    }

    pub fn restricted_to(mut self, archetypes: &[Archetype]) -> Self {
        self.archetype_restriction = Some(archetypes.to_vec());
        self
    }

    pub fn placement(&self) -> Result<Placement, DomainError> {
        Placement::parse(self.category.as_str(), &self.subtype)
    }

    pub fn allows(&self, archetype: Archetype) -> bool {
        self.archetype_restriction
            .as_ref()
            .map(|allowed| allowed.contains(&archetype))
            .unwrap_or(true)
    }
}
