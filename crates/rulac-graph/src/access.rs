//! The read contract every conflict graph backend implements.

use rulac_core::{Conflict, ConflictId, Country, CountryId, Region, RegionCode, StateActor};

use crate::client::GraphError;

/// A conflict together with one country it takes place in.
///
/// A conflict spanning several countries appears once per country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedConflict {
    pub country_id: CountryId,
    pub conflict: Conflict,
    /// `ConflictType.type` of the classification edge, if any.
    pub conflict_type: Option<String>,
}

/// A state actor that is party to a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyLink {
    pub conflict_id: ConflictId,
    pub state_actor: StateActor,
}

/// Typed reads over the RULAC conflict graph.
///
/// Empty sequences are normal results. Only a missing region is reported
/// as `Ok(None)`; everything else that goes wrong is a [`GraphError`].
/// A single report build issues several of these reads, so implementations
/// must serve them from one consistent view of the data.
#[async_trait::async_trait]
pub trait ConflictGraph: Send + Sync {
    /// Fetch a region by its UN M49 code.
    async fn region_by_code(&self, code: &RegionCode) -> Result<Option<Region>, GraphError>;

    /// Countries belonging to the region.
    async fn countries_in_region(&self, code: &RegionCode) -> Result<Vec<Country>, GraphError>;

    /// Conflicts taking place in any of the given countries.
    ///
    /// When `conflict_type` is set, backends may drop conflicts of other
    /// types. Callers must not rely on it.
    async fn conflicts_in_countries(
        &self,
        countries: &[CountryId],
        conflict_type: Option<&str>,
    ) -> Result<Vec<LocatedConflict>, GraphError>;

    /// State actors party to any of the given conflicts.
    async fn state_parties(&self, conflicts: &[ConflictId]) -> Result<Vec<PartyLink>, GraphError>;
}
