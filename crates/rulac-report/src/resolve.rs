//! Traversal resolution: the anchor region plus outer-joined dependents.
//!
//! Resolution is staged: fetch the region, then its countries, then the
//! conflicts located in those countries, then the state parties of the
//! matched conflicts. The stages are stitched into [`JoinRow`]s where every
//! branch below the region is nullable. The conflict type filter is a
//! predicate on the conflict branch only, so a country whose conflicts all
//! fail it still yields a row.

use std::collections::{HashMap, HashSet};

use rulac_core::{Conflict, ConflictId, Country, CountryId, Region, RegionCode, StateActor};
use rulac_graph::{ConflictGraph, LocatedConflict, PartyLink};

use crate::error::{ReportError, Result};

/// One (country, conflict, state actor) combination reachable from the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRow {
    pub country: Option<Country>,
    pub conflict: Option<Conflict>,
    pub state_actor: Option<StateActor>,
}

/// The resolved anchor and its join rows. `rows` is never empty.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub region: Region,
    pub rows: Vec<JoinRow>,
}

/// Resolve `region_code` and its dependents filtered to `conflict_type`.
pub async fn resolve<G>(
    graph: &G,
    region_code: &RegionCode,
    conflict_type: &str,
) -> Result<Resolution>
where
    G: ConflictGraph + ?Sized,
{
    let region = graph
        .region_by_code(region_code)
        .await?
        .ok_or_else(|| ReportError::NotFound {
            region_code: region_code.to_string(),
        })?;

    let countries = graph.countries_in_region(region_code).await?;
    let country_ids: Vec<CountryId> = countries.iter().map(|c| c.id.clone()).collect();

    let located = graph
        .conflicts_in_countries(&country_ids, Some(conflict_type))
        .await?;
    let matched = matching_branch(located, conflict_type);

    let mut conflict_ids = Vec::new();
    let mut seen = HashSet::new();
    for l in &matched {
        if seen.insert(&l.conflict.id) {
            conflict_ids.push(l.conflict.id.clone());
        }
    }

    let parties = graph.state_parties(&conflict_ids).await?;

    tracing::debug!(
        region_code = %region_code,
        conflict_type,
        countries = countries.len(),
        conflicts = conflict_ids.len(),
        party_links = parties.len(),
        "Resolved region traversal"
    );

    Ok(Resolution {
        region,
        rows: join_rows(&countries, &matched, &parties),
    })
}

/// Apply the type filter to the conflict branch.
fn matching_branch(located: Vec<LocatedConflict>, conflict_type: &str) -> Vec<LocatedConflict> {
    let total = located.len();
    let matched: Vec<_> = located
        .into_iter()
        .filter(|l| l.conflict_type.as_deref() == Some(conflict_type))
        .collect();
    if matched.len() < total {
        tracing::warn!(
            conflict_type,
            dropped = total - matched.len(),
            "Store returned conflicts outside the requested type"
        );
    }
    matched
}

/// Outer-join countries → matched conflicts → state parties.
///
/// A region without countries yields a single all-absent row. A country
/// without matched conflicts yields one row with no conflict. A conflict
/// without parties yields one row with no state actor.
pub fn join_rows(
    countries: &[Country],
    matched: &[LocatedConflict],
    parties: &[PartyLink],
) -> Vec<JoinRow> {
    if countries.is_empty() {
        return vec![JoinRow {
            country: None,
            conflict: None,
            state_actor: None,
        }];
    }

    let mut by_country: HashMap<&CountryId, Vec<&Conflict>> = HashMap::new();
    for l in matched {
        let entry = by_country.entry(&l.country_id).or_default();
        if !entry.iter().any(|c| c.id == l.conflict.id) {
            entry.push(&l.conflict);
        }
    }

    let mut by_conflict: HashMap<&ConflictId, Vec<&StateActor>> = HashMap::new();
    for p in parties {
        let entry = by_conflict.entry(&p.conflict_id).or_default();
        if !entry.iter().any(|a| a.id == p.state_actor.id) {
            entry.push(&p.state_actor);
        }
    }

    let mut rows = Vec::new();
    for country in countries {
        let conflicts = by_country
            .get(&country.id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if conflicts.is_empty() {
            rows.push(JoinRow {
                country: Some(country.clone()),
                conflict: None,
                state_actor: None,
            });
            continue;
        }

        for &conflict in conflicts {
            let actors = by_conflict
                .get(&conflict.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if actors.is_empty() {
                rows.push(JoinRow {
                    country: Some(country.clone()),
                    conflict: Some(conflict.clone()),
                    state_actor: None,
                });
            }
            for &actor in actors {
                rows.push(JoinRow {
                    country: Some(country.clone()),
                    conflict: Some(conflict.clone()),
                    state_actor: Some(actor.clone()),
                });
            }
        }
    }
    rows
}
