//! Core domain types for RULAC conflict reports.
//!
//! Entity types mirror the nodes of the RULAC conflict graph. They are
//! read-only inputs: nothing in the report pipeline creates or mutates them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulacError};

// ── Identifiers ───────────────────────────────────────────────────

/// UN M49 code identifying a geographic region (e.g. "150" for Europe).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RegionCode(pub String);

impl RegionCode {
    /// Parse and validate a region code: 1 to 3 ASCII digits after trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(RulacError::Validation("region code is empty".to_string()));
        }
        if code.len() > 3 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(RulacError::Validation(format!(
                "region code {code:?} is not a UN M49 code"
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store identifier of a Country node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CountryId(pub String);

/// Store identifier of a Conflict node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ConflictId(pub String);

/// Store identifier of a StateActor node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StateActorId(pub String);

// ── Entities ──────────────────────────────────────────────────────

/// A UN M49 geographic region. The anchor of every report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub code: RegionCode,
    pub name: String,
}

/// A country belonging to a region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: CountryId,
    pub name: Option<String>,
}

/// An armed conflict as recorded by RULAC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conflict {
    pub id: ConflictId,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub applicable_law: Option<String>,
    pub citation: Option<String>,
}

/// A state party to one or more conflicts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateActor {
    pub id: StateActorId,
    pub name: Option<String>,
}

// ── Classifications ───────────────────────────────────────────────

/// The conflict classifications RULAC recognizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConflictClassification {
    #[serde(rename = "International Armed Conflict (IAC)")]
    International,
    #[serde(rename = "Non-International Armed Conflict (NIAC)")]
    NonInternational,
    #[serde(rename = "Military Occupation")]
    MilitaryOccupation,
}

impl ConflictClassification {
    pub const ALL: [Self; 3] = [
        Self::International,
        Self::NonInternational,
        Self::MilitaryOccupation,
    ];

    /// The exact `ConflictType.type` label stored in the graph.
    pub fn label(&self) -> &'static str {
        match self {
            Self::International => "International Armed Conflict (IAC)",
            Self::NonInternational => "Non-International Armed Conflict (NIAC)",
            Self::MilitaryOccupation => "Military Occupation",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for ConflictClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Report ────────────────────────────────────────────────────────

/// Fallback for a conflict without a recorded name.
pub const UNKNOWN: &str = "Unknown";
/// Fallback for a conflict without an overview.
pub const NO_OVERVIEW: &str = "No Overview Available";
/// Fallback for a conflict without applicable IHL law.
pub const NOT_SPECIFIED: &str = "Not Specified";
/// Fallback for a conflict without a citation.
pub const NO_CITATION: &str = "No Citation Available";
/// Fallback when no state actor is party to the reported conflicts.
pub const NO_STATE_ACTORS: &str = "No state actors recorded";

/// Per-conflict entry of a report. Every field is always populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictDetail {
    pub conflict_name: String,
    pub conflict_classification: String,
    pub conflict_overview: String,
    pub applicable_ihl_law: String,
    pub conflict_citation: String,
    pub state_parties: String,
}

/// Conflicts of one classification taking place in one region.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub summary: String,
    pub conflict_details: Vec<ConflictDetail>,
}
