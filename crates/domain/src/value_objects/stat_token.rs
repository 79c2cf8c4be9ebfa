//! Parsed stat identifier.

use super::stat_definition::Instancing;
use super::stat_key::compose_instanced;

/// The structured form of a raw identifier such as `Allies(Police)/background`
/// or `Melee[Knives]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatToken {
    pub name: String,
    pub qualifier: Option<String>,
    pub hint: Option<String>,
    /// Specialty text for `name[text]` tokens. `Some("")` for `name[]`.
    pub specialty: Option<String>,
    /// Instancing rule from the catalog, when the catalog knows the name.
    pub instancing: Option<Instancing>,
    /// True when parsing fell back to treating the whole input as a name.
    pub degraded: bool,
}

impl StatToken {
    /// A token holding only a stat name.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
            hint: None,
            specialty: None,
            instancing: None,
            degraded: false,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_specialty(&self) -> bool {
        self.specialty.is_some()
    }

    /// Storage name for `canonical`, with this token's qualifier attached.
    pub fn storage_name(&self, canonical: &str) -> String {
        compose_instanced(canonical, self.qualifier.as_deref())
    }
}
