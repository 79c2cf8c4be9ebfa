//! JSON stat catalog.
//!
//! Loads a list of stat definitions from a file and layers it over the
//! built-in catalog. Entries in the file replace built-in entries of the
//! same name.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use darkroster_domain::{CatalogError, InMemoryCatalog, StatCatalog, StatDefinition};

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid definition '{name}': {reason}")]
    Malformed { name: String, reason: String },
}

/// Catalog backed by a JSON file of `StatDefinition`s.
pub struct JsonCatalog {
    path: PathBuf,
    inner: InMemoryCatalog,
}

impl JsonCatalog {
    /// Load `path` on top of the built-in definitions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref().to_path_buf();
        let definitions = read_definitions(&path)?;

        let mut inner = InMemoryCatalog::builtin();
        let count = definitions.len();
        inner.extend(definitions);
        tracing::info!(path = %path.display(), count, "Loaded stat catalog");

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn read_definitions(path: &Path) -> Result<Vec<StatDefinition>, CatalogLoadError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let definitions: Vec<StatDefinition> =
        serde_json::from_str(&content).map_err(|source| CatalogLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    for definition in &definitions {
        if definition.name.trim().is_empty() {
            return Err(CatalogLoadError::Malformed {
                name: definition.name.clone(),
                reason: "empty name".to_string(),
            });
        }
        definition
            .placement()
            .map_err(|e| CatalogLoadError::Malformed {
                name: definition.name.clone(),
                reason: e.to_string(),
            })?;
    }
    Ok(definitions)
}

impl StatCatalog for JsonCatalog {
    fn find_stat_definition(&self, name: &str) -> Result<Option<StatDefinition>, CatalogError> {
        self.inner.find_stat_definition(name)
    }

    fn find_stat_definitions(
        &self,
        name_contains: &str,
    ) -> Result<Vec<StatDefinition>, CatalogError> {
        self.inner.find_stat_definitions(name_contains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkroster_domain::{Archetype, Instancing, ValueDomain};
    use std::io::Write;

    fn write_catalog(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write catalog");
        file
    }

    #[test]
    fn file_entries_extend_and_override_builtin() {
        let file = write_catalog(
            r#"[
                {
                    "name": "Fame",
                    "category": "backgrounds",
                    "subtype": "background",
                    "value_domain": {"kind": "numeric", "min": 0, "max": 5},
                    "instancing": "forbidden"
                },
                {
                    "name": "Allies",
                    "category": "backgrounds",
                    "subtype": "background",
                    "value_domain": {"kind": "numeric", "min": 0, "max": 3},
                    "archetype_restriction": ["Vampire"]
                }
            ]"#,
        );
        let catalog = JsonCatalog::load(file.path()).expect("valid catalog");

        let fame = catalog
            .find_stat_definition("fame")
            .expect("lookup")
            .expect("defined");
        assert_eq!(fame.instancing, Instancing::Forbidden);

        let allies = catalog
            .find_stat_definition("Allies")
            .expect("lookup")
            .expect("defined");
        assert_eq!(allies.value_domain, ValueDomain::Numeric { min: 0, max: 3 });
        assert!(!allies.allows(Archetype::Mage));

        assert!(catalog.find_stat_definition("Language").expect("lookup").is_some());
    }

    #[test]
    fn unknown_subtype_is_rejected() {
        let file = write_catalog(
            r#"[{
                "name": "Odd",
                "category": "merits",
                "subtype": "cosmic",
                "value_domain": {"kind": "free_text"}
            }]"#,
        );
        let err = JsonCatalog::load(file.path()).err().expect("malformed");
        assert!(matches!(err, CatalogLoadError::Malformed { .. }));
        assert!(err.to_string().contains("Odd"));
    }

    #[test]
    fn broken_json_reports_the_path() {
        let file = write_catalog("[{");
        let err = JsonCatalog::load(file.path()).err().expect("invalid json");
        assert!(matches!(err, CatalogLoadError::Json { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = JsonCatalog::load(dir.path().join("missing.json"))
            .err()
            .expect("missing file");
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }
}
