//! Application composition.

use std::sync::Arc;

use anyhow::Context;

use darkroster_domain::{ArchetypeInitializer, InMemoryCatalog, RulesRegistry, StatCatalog};

use crate::config::EngineConfig;
use crate::infrastructure::{JsonCatalog, SkeletonInitializer};
use crate::use_cases::{LegacySheetRepair, StatChangeUseCase};

/// Main application state.
pub struct App {
    pub catalog: Arc<dyn StatCatalog>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub stat_change: StatChangeUseCase,
    pub repair: LegacySheetRepair,
}

impl App {
    /// Wire the catalog, initializer and rule registry described by `config`.
    pub fn from_config(config: &EngineConfig) -> anyhow::Result<Self> {
        let catalog: Arc<dyn StatCatalog> = match &config.catalog_path {
            Some(path) => Arc::new(
                JsonCatalog::load(path)
                    .with_context(|| format!("loading stat catalog {}", path.display()))?,
            ),
            None => Arc::new(InMemoryCatalog::builtin()),
        };
        Ok(Self::new(catalog, config))
    }

    pub fn new(catalog: Arc<dyn StatCatalog>, config: &EngineConfig) -> Self {
        let initializer: Arc<dyn ArchetypeInitializer> = Arc::new(SkeletonInitializer::new());
        let registry = RulesRegistry::new().with_policy(config.suggestions);

        let use_cases = UseCases {
            stat_change: StatChangeUseCase::new(catalog.clone(), initializer, registry),
            repair: LegacySheetRepair::new(catalog.clone()),
        };

        Self { catalog, use_cases }
    }
}
