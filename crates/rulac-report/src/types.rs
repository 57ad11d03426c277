//! Request types for report builds.

use serde::{Deserialize, Serialize};

use rulac_core::{ConflictClassification, RegionCode};

use crate::error::{ReportError, Result};

/// Request to build a regional conflict report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// UN M49 code of the region, e.g. "150".
    pub region_code: String,
    /// Exact `ConflictType.type` label, e.g. "Military Occupation".
    pub conflict_type: String,
}

impl ReportRequest {
    pub fn new(region_code: impl Into<String>, conflict_type: impl Into<String>) -> Self {
        Self {
            region_code: region_code.into(),
            conflict_type: conflict_type.into(),
        }
    }

    /// Check the request before any graph access.
    ///
    /// With `strict_classification`, the label must be one of the RULAC
    /// classifications; otherwise any non-empty label is passed through.
    pub fn validate(&self, strict_classification: bool) -> Result<ValidRequest> {
        let region_code = RegionCode::parse(&self.region_code)?;

        let conflict_type = self.conflict_type.trim();
        if conflict_type.is_empty() {
            return Err(ReportError::Validation("conflict type is empty".to_string()));
        }
        if strict_classification && ConflictClassification::from_label(conflict_type).is_none() {
            let known: Vec<_> = ConflictClassification::ALL.iter().map(|c| c.label()).collect();
            return Err(ReportError::Validation(format!(
                "unknown conflict type {conflict_type:?}; expected one of: {}",
                known.join(", ")
            )));
        }

        Ok(ValidRequest {
            region_code,
            conflict_type: conflict_type.to_string(),
        })
    }
}

/// A request whose inputs passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub region_code: RegionCode,
    pub conflict_type: String,
}
