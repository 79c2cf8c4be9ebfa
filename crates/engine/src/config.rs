//! Engine configuration from environment variables.

use std::path::PathBuf;

use anyhow::Context;

use darkroster_domain::SuggestionPolicy;

pub const CATALOG_PATH_VAR: &str = "DARKROSTER_CATALOG_PATH";
pub const SUGGESTION_LIMIT_VAR: &str = "DARKROSTER_SUGGESTION_LIMIT";
pub const SUGGESTION_THRESHOLD_VAR: &str = "DARKROSTER_SUGGESTION_THRESHOLD";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// JSON catalog layered over the built-in one. Built-in only when unset.
    pub catalog_path: Option<PathBuf>,
    pub suggestions: SuggestionPolicy,
}

impl EngineConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = SuggestionPolicy::default();

        let limit = match var(SUGGESTION_LIMIT_VAR) {
            Some(raw) => raw.parse::<usize>().with_context(|| {
                format!("{} must be a whole number, got '{}'", SUGGESTION_LIMIT_VAR, raw)
            })?,
            None => defaults.limit,
        };
        let threshold = match var(SUGGESTION_THRESHOLD_VAR) {
            Some(raw) => raw.parse::<f64>().with_context(|| {
                format!("{} must be a number, got '{}'", SUGGESTION_THRESHOLD_VAR, raw)
            })?,
            None => defaults.threshold,
        };
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!(
                "{} must be between 0 and 1, got {}",
                SUGGESTION_THRESHOLD_VAR,
                threshold
            );
        }

        Ok(Self {
            catalog_path: var(CATALOG_PATH_VAR).map(PathBuf::from),
            suggestions: SuggestionPolicy::new(limit, threshold),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<EngineConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).expect("defaults");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.suggestions.limit, 5);
    }

    #[test]
    fn reads_all_variables() {
        let config = config(&[
            (CATALOG_PATH_VAR, "/etc/darkroster/catalog.json"),
            (SUGGESTION_LIMIT_VAR, "3"),
            (SUGGESTION_THRESHOLD_VAR, "0.9"),
        ])
        .expect("valid");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/darkroster/catalog.json"))
        );
        assert_eq!(config.suggestions, SuggestionPolicy::new(3, 0.9));
    }

    #[test]
    fn blank_path_means_builtin() {
        let config = config(&[(CATALOG_PATH_VAR, "   ")]).expect("valid");
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = config(&[(SUGGESTION_LIMIT_VAR, "many")]).unwrap_err();
        assert!(err.to_string().contains(SUGGESTION_LIMIT_VAR));
        assert!(config(&[(SUGGESTION_THRESHOLD_VAR, "1.5")]).is_err());
    }
}
