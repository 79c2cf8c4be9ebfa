//! Use cases - User story orchestration.
//!
//! Each module contains the use cases for one area of character editing.

pub mod repair;
pub mod stat_change;

pub use repair::{LegacySheetRepair, RepairError, RepairReport};
pub use stat_change::{
    InstancingError, OutcomeStatus, StatChange, StatChangeError, StatChangeOutcome,
    StatChangeReport, StatChangeUseCase,
};
