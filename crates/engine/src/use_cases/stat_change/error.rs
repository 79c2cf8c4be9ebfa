//! Stat change errors.

use darkroster_domain::{ParseError, ValidationFailure};

/// Qualifier present where the catalog forbids one, or missing where it
/// requires one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstancingError {
    #[error("{name} requires a qualifier, e.g. {name}(something).")]
    QualifierRequired { name: String },

    #[error("{name} does not take a qualifier.")]
    QualifierForbidden { name: String },
}

/// Errors that can occur while applying a stat change.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatChangeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("The category/subtype of '{name}' could not be determined.{}", did_you_mean(.suggestions))]
    Resolution {
        name: String,
        suggestions: Vec<String>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Instancing(#[from] InstancingError),

    #[error("{name} was not found.")]
    NotFound { name: String },
}

impl StatChangeError {
    pub fn resolution(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::Resolution {
            name: name.into(),
            suggestions,
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Near-miss names or values offered with the failure.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Resolution { suggestions, .. } => suggestions,
            Self::Validation(failure) => &failure.suggestions,
            _ => &[],
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean: {}?", suggestions.join(", "))
    }
}
