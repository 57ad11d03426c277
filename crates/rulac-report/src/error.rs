//! Error types for the rulac-report crate.

use rulac_core::RulacError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Region not found: no region with UN M49 code {region_code}")]
    NotFound { region_code: String },

    #[error("Invalid report request: {0}")]
    Validation(String),

    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(#[from] rulac_graph::GraphError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<RulacError> for ReportError {
    fn from(e: RulacError) -> Self {
        match e {
            RulacError::Validation(msg) => Self::Validation(msg),
            RulacError::Config(msg) => Self::Config(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
