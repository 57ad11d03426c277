//! rulac-core: Shared types, configuration, and error handling for RULAC conflict reports.
//!
//! This crate provides the foundational types used across all report components:
//! - Entity types (Region, Country, Conflict, StateActor) read from the conflict graph
//! - The Report output shape and its rendering defaults
//! - Report configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{PartyScope, ReportConfig};
pub use error::RulacError;
pub use types::{
    Conflict, ConflictClassification, ConflictDetail, ConflictId, Country, CountryId, Region,
    RegionCode, Report, StateActor, StateActorId,
};
