//! Configuration management for RULAC report services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`RULAC__SECTION__KEY`, e.g. `RULAC__REPORT__PARTY_SCOPE`)
//! 2. Config file (`rulac.toml` by default)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;

/// Which state actors populate `ConflictDetail::state_parties`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PartyScope {
    /// Every detail lists all state actors party to any matched conflict in the region.
    #[default]
    RegionWide,
    /// Each detail lists only the state actors party to that conflict.
    PerConflict,
}

/// Report rendering options, read from the `[report]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    #[serde(default)]
    pub party_scope: PartyScope,

    /// Reject conflict type labels that are not one of the RULAC classifications.
    #[serde(default = "default_true")]
    pub strict_classification: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            party_scope: PartyScope::default(),
            strict_classification: default_true(),
        }
    }
}

impl ReportConfig {
    /// Extract the `[report]` section, falling back to defaults when absent.
    pub fn from_config(cfg: &config::Config) -> Result<Self> {
        match cfg.get::<ReportConfig>("report") {
            Ok(report) => Ok(report),
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Build the layered configuration: optional `<file_prefix>.toml` under `RULAC__*` env vars.
pub fn load_layered(file_prefix: &str) -> Result<config::Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("RULAC")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    tracing::debug!(file_prefix, "Loaded layered configuration");
    Ok(cfg)
}
