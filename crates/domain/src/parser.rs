//! Identifier parser: raw user input to `StatToken`.
//!
//! Accepted forms are `name`, `name(qualifier)`, either followed by `/hint`,
//! and `name[specialty]`.

use std::sync::Arc;

use thiserror::Error;

use crate::ports::StatCatalog;
use crate::value_objects::StatToken;

/// Malformed identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid stat identifier '{input}': {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: &'static str,
}

impl ParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

pub struct StatParser {
    catalog: Arc<dyn StatCatalog>,
}

impl StatParser {
    pub fn new(catalog: Arc<dyn StatCatalog>) -> Self {
        Self { catalog }
    }

    /// Parse `raw` and attach the catalog's instancing rule for the name.
    ///
    /// A failing catalog does not fail the parse: the whole input becomes the
    /// token name and the token is marked degraded.
    pub fn parse(&self, raw: &str) -> Result<StatToken, ParseError> {
        let mut token = parse_syntax(raw)?;
        if token.is_specialty() {
            return Ok(token);
        }

        match self.catalog.find_stat_definition(&token.name) {
            Ok(definition) => {
                token.instancing = definition.map(|d| d.instancing);
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(
                    input = raw.trim(),
                    error = %e,
                    "Catalog lookup failed while parsing, using bare name"
                );
                let mut degraded = StatToken::bare(raw.trim());
                degraded.degraded = true;
                Ok(degraded)
            }
        }
    }
}

/// Syntax-only parse, without the catalog lookup.
pub fn parse_syntax(raw: &str) -> Result<StatToken, ParseError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ParseError::new(input, "stat name cannot be empty"));
    }

    if let Some(open) = input.find('[') {
        return parse_specialty(input, open);
    }
    if input.contains(']') {
        return Err(ParseError::new(input, "unexpected ']'"));
    }

    let (head, hint) = match input.find('/') {
        Some(slash) => {
            let hint = input[slash + 1..].trim().to_lowercase();
            if hint.is_empty() {
                return Err(ParseError::new(input, "empty category hint after '/'"));
            }
            (&input[..slash], Some(hint))
        }
        None => (input, None),
    };

    let (name, qualifier) = split_qualifier(input, head)?;
    if name.is_empty() {
        return Err(ParseError::new(input, "stat name cannot be empty"));
    }

    let mut token = StatToken::bare(name);
    token.qualifier = qualifier.map(str::to_string);
    token.hint = hint;
    Ok(token)
}

fn parse_specialty(input: &str, open: usize) -> Result<StatToken, ParseError> {
    if !input.ends_with(']') {
        return Err(ParseError::new(
            input,
            "specialty brackets must end the identifier",
        ));
    }
    let name = input[..open].trim();
    let text = &input[open + 1..input.len() - 1];
    if text.contains('[') || text.contains(']') {
        return Err(ParseError::new(input, "nested specialty brackets"));
    }
    if name.contains(['(', ')', '/']) {
        return Err(ParseError::new(
            input,
            "a specialty cannot be combined with a qualifier or hint",
        ));
    }
    if name.is_empty() {
        return Err(ParseError::new(input, "stat name cannot be empty"));
    }

    let mut token = StatToken::bare(name);
    token.specialty = Some(text.trim().to_string());
    Ok(token)
}

fn split_qualifier<'a>(
    input: &str,
    head: &'a str,
) -> Result<(&'a str, Option<&'a str>), ParseError> {
    let Some(open) = head.find('(') else {
        if head.contains(')') {
            return Err(ParseError::new(input, "unexpected ')'"));
        }
        return Ok((head.trim(), None));
    };

    if head[..open].contains(')') {
        return Err(ParseError::new(input, "unexpected ')'"));
    }
    let Some(close) = head.rfind(')') else {
        return Err(ParseError::new(input, "qualifier must be closed before '/'"));
    };
    let qualifier = &head[open + 1..close];
    if qualifier.contains(['(', ')']) {
        return Err(ParseError::new(input, "nested parentheses in qualifier"));
    }
    if !head[close + 1..].trim().is_empty() {
        return Err(ParseError::new(input, "unexpected text after qualifier"));
    }
    let qualifier = qualifier.trim();
    if qualifier.is_empty() {
        return Err(ParseError::new(input, "empty qualifier"));
    }
    Ok((head[..open].trim(), Some(qualifier)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::ports::{CatalogError, MockStatCatalog};
    use crate::value_objects::Instancing;

    fn parser() -> StatParser {
        StatParser::new(Arc::new(InMemoryCatalog::builtin()))
    }

    #[test]
    fn parses_qualifier_and_hint() {
        let token = parser().parse(" Allies(Police)/Background ").expect("valid");
        assert_eq!(token.name, "Allies");
        assert_eq!(token.qualifier.as_deref(), Some("Police"));
        assert_eq!(token.hint.as_deref(), Some("background"));
        assert_eq!(token.instancing, Some(Instancing::Optional));
        assert!(!token.degraded);
    }

    #[test]
    fn unknown_names_carry_no_instancing() {
        let token = parser().parse("Strength").expect("valid");
        assert_eq!(token, StatToken::bare("Strength"));
    }

    #[test]
    fn specialty_tokens() {
        let token = parser().parse("Melee[Knives]").expect("valid");
        assert_eq!(token.name, "Melee");
        assert_eq!(token.specialty.as_deref(), Some("Knives"));

        let empty = parser().parse("Melee[]").expect("valid");
        assert_eq!(empty.specialty.as_deref(), Some(""));
    }

    #[test]
    fn malformed_specialties_are_rejected() {
        assert!(parse_syntax("Melee[Knives] extra").is_err());
        assert!(parse_syntax("Melee(X)[Knives]").is_err());
        assert!(parse_syntax("Melee/skill[Knives]").is_err());
        assert!(parse_syntax("Melee[[Knives]]").is_err());
        assert!(parse_syntax("[Knives]").is_err());
    }

    #[test]
    fn malformed_qualifiers_are_rejected() {
        for bad in [
            "Allies(Police",
            "Allies(Pol/ice)",
            "Allies((Police))",
            "Allies)",
            "Allies()",
            "Allies(Police) extra/background",
            "Allies]",
            "Allies/",
            "   ",
            "(Police)",
        ] {
            assert!(parse_syntax(bad).is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn error_names_the_input() {
        let err = parse_syntax("Allies(").unwrap_err();
        assert_eq!(err.input, "Allies(");
        assert!(err.to_string().contains("qualifier must be closed"));
    }

    #[test]
    fn catalog_failure_degrades_to_bare_name() {
        let mut catalog = MockStatCatalog::new();
        catalog
            .expect_find_stat_definition()
            .returning(|_| Err(CatalogError::Unavailable("offline".to_string())));

        let token = StatParser::new(Arc::new(catalog))
            .parse("Allies(Police)/background")
            .expect("degraded, not failed");
        assert!(token.degraded);
        assert_eq!(token.name, "Allies(Police)/background");
        assert_eq!(token.qualifier, None);
    }
}
