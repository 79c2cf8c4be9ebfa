//! darkroster engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - Stat change orchestration and legacy sheet repair
//! - `infrastructure/` - Port implementations (JSON catalog, skeleton initializer)
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
