//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction and parsing,
//! plus the validation failure type surfaced verbatim by the archetype rules.

use std::fmt;

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} named {name}")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Stat name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant:
    ///
    /// ```ignore
    /// impl FromStr for Category {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "attributes" => Ok(Self::Attributes),
    ///             _ => Err(DomainError::parse(format!("Unknown category: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// A rejected value, with optional "did you mean" candidates.
///
/// Returned by every validator as a local failure; the message is shown to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            message: message.into(),
            suggestions,
        }
    }

    /// True when the failure came from an archetype-exclusivity check.
    pub fn is_exclusivity(&self) -> bool {
        self.message.contains("only available to")
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, " Did you mean: {}?", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<DomainError> for ValidationFailure {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Parse(msg) => Self::new(msg),
            other => Self::new(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Stat", "Strenght");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Strenght"));
    }

    #[test]
    fn failure_display_lists_suggestions() {
        let failure = ValidationFailure::with_suggestions(
            "Invalid clan 'Bruja'.",
            vec!["Brujah".to_string()],
        );
        assert_eq!(failure.to_string(), "Invalid clan 'Bruja'. Did you mean: Brujah?");
    }

    #[test]
    fn failure_from_parse_error_keeps_message() {
        let failure: ValidationFailure = DomainError::parse("Unknown category: foo").into();
        assert_eq!(failure.message, "Unknown category: foo");
        assert!(failure.suggestions.is_empty());
    }
}
