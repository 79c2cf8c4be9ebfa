//! Infrastructure implementations.
//!
//! Adapters for the domain ports: a file-backed stat catalog and the
//! archetype skeleton initializer.

pub mod json_catalog;
pub mod skeleton;

pub use json_catalog::{CatalogLoadError, JsonCatalog};
pub use skeleton::SkeletonInitializer;
