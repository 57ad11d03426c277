//! rulac-report: Regional armed conflict reports over the RULAC conflict graph.
//!
//! Builds a report of the conflicts of one classification taking place in a
//! UN M49 region. A region that resolves always produces a report, even
//! when no conflict of the requested type exists there.
//!
//! The pipeline is strictly staged:
//! resolve (anchor + outer-joined rows) → aggregate → render → assemble.

pub mod aggregate;
pub mod error;
pub mod render;
pub mod resolve;
pub mod types;

pub use aggregate::{RegionAggregate, StateActorConflicts};
pub use error::ReportError;
pub use types::{ReportRequest, ValidRequest};

use rulac_core::{Report, ReportConfig};
use rulac_graph::ConflictGraph;

/// Assembles reports from any [`ConflictGraph`] backend.
///
/// The engine holds no per-build state; concurrent builds may share it.
#[derive(Debug, Clone, Default)]
pub struct ReportEngine {
    config: ReportConfig,
}

impl ReportEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Resolve and aggregate without rendering.
    pub async fn aggregate<G>(
        &self,
        graph: &G,
        request: &ReportRequest,
    ) -> error::Result<RegionAggregate>
    where
        G: ConflictGraph + ?Sized,
    {
        let valid = request.validate(self.config.strict_classification)?;
        let resolution = resolve::resolve(graph, &valid.region_code, &valid.conflict_type).await?;
        let agg = aggregate::aggregate(resolution, &valid.conflict_type);

        tracing::debug!(
            region_code = %valid.region_code,
            countries = agg.all_region_countries.len(),
            conflicts = agg.total_distinct_conflicts,
            state_actors = agg.state_actors.len(),
            "Aggregated region"
        );
        Ok(agg)
    }

    /// Build the report for one region and conflict type.
    ///
    /// Fails with [`ReportError::NotFound`] only when the region does not
    /// resolve. Absent countries, conflicts, or state actors are rendered
    /// with defaults.
    pub async fn build<G>(&self, graph: &G, request: &ReportRequest) -> error::Result<Report>
    where
        G: ConflictGraph + ?Sized,
    {
        let start = std::time::Instant::now();
        let agg = self.aggregate(graph, request).await?;
        let report = render::render(&agg, self.config.party_scope);

        tracing::info!(
            region_code = %agg.region.code,
            conflict_type = %agg.conflict_type,
            conflicts = report.conflict_details.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built conflict report"
        );
        Ok(report)
    }
}
