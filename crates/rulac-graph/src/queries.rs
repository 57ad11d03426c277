//! Cypher reads against the RULAC conflict graph, served from one read transaction.

use neo4rs::{query, Query, Row, Txn};
use tokio::sync::Mutex;

use rulac_core::types::UNKNOWN;
use rulac_core::{
    Conflict, ConflictId, Country, CountryId, Region, RegionCode, StateActor, StateActorId,
};

use crate::access::{ConflictGraph, LocatedConflict, PartyLink};
use crate::client::{GraphClient, GraphError};

/// A consistent read view of the graph for the duration of one report build.
///
/// Every query issued through the snapshot runs inside the same transaction,
/// so the region, its countries, conflicts, and parties are read from the
/// same point in time.
pub struct ReadSnapshot {
    txn: Mutex<Txn>,
}

impl GraphClient {
    /// Open a read snapshot. Call [`ReadSnapshot::close`] when done.
    pub async fn snapshot(&self) -> Result<ReadSnapshot, GraphError> {
        let txn = self.start_txn().await?;
        tracing::debug!("Opened read snapshot");
        Ok(ReadSnapshot {
            txn: Mutex::new(txn),
        })
    }
}

impl ReadSnapshot {
    /// End the underlying transaction. Nothing was written, so this rolls back.
    pub async fn close(self) -> Result<(), GraphError> {
        self.txn.into_inner().rollback().await?;
        Ok(())
    }

    async fn query_rows(&self, q: Query) -> Result<Vec<Row>, GraphError> {
        let mut txn = self.txn.lock().await;
        let mut stream = txn.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next(txn.handle()).await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl ConflictGraph for ReadSnapshot {
    async fn region_by_code(&self, code: &RegionCode) -> Result<Option<Region>, GraphError> {
        let q = query(
            "MATCH (gr:GeoRegion {UN_M49Code: $code})
             RETURN gr.UN_M49Code AS code, gr.name AS name
             LIMIT 1",
        )
        .param("code", code.as_str());

        match self.query_rows(q).await?.into_iter().next() {
            Some(row) => Ok(Some(Region {
                code: RegionCode(required(&row, "code")?),
                name: optional(&row, "name").unwrap_or_else(|| UNKNOWN.to_string()),
            })),
            None => Ok(None),
        }
    }

    async fn countries_in_region(&self, code: &RegionCode) -> Result<Vec<Country>, GraphError> {
        let q = query(
            "MATCH (co:Country)-[:BELONGS_TO]->(:GeoRegion {UN_M49Code: $code})
             RETURN elementId(co) AS id, co.name AS name
             ORDER BY name, id",
        )
        .param("code", code.as_str());

        let rows = self.query_rows(q).await?;
        let mut countries = Vec::with_capacity(rows.len());
        for row in rows {
            countries.push(Country {
                id: CountryId(required(&row, "id")?),
                name: optional(&row, "name"),
            });
        }
        Ok(countries)
    }

    async fn conflicts_in_countries(
        &self,
        countries: &[CountryId],
        conflict_type: Option<&str>,
    ) -> Result<Vec<LocatedConflict>, GraphError> {
        if countries.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = countries.iter().map(|c| c.0.clone()).collect();
        let q = query(
            "UNWIND $country_ids AS country_id
             MATCH (co:Country)<-[:IS_TAKING_PLACE_IN_COUNTRY]-(c:Conflict)
             WHERE elementId(co) = country_id
             OPTIONAL MATCH (c)-[:IS_CLASSIFIED_AS_CONFLICT_TYPE]->(ct:ConflictType)
             WITH co, c, ct
             WHERE $conflict_type = '' OR ct.type = $conflict_type
             RETURN elementId(co) AS country_id, elementId(c) AS id, c.name AS name,
                    c.overview AS overview, c.applicable_law AS applicable_law,
                    c.citation AS citation, ct.type AS conflict_type
             ORDER BY country_id, name, id",
        )
        .param("country_ids", ids)
        .param("conflict_type", conflict_type.unwrap_or(""));

        let rows = self.query_rows(q).await?;
        let mut located = Vec::with_capacity(rows.len());
        for row in rows {
            located.push(LocatedConflict {
                country_id: CountryId(required(&row, "country_id")?),
                conflict: Conflict {
                    id: ConflictId(required(&row, "id")?),
                    name: optional(&row, "name"),
                    overview: optional(&row, "overview"),
                    applicable_law: optional(&row, "applicable_law"),
                    citation: optional(&row, "citation"),
                },
                conflict_type: optional(&row, "conflict_type"),
            });
        }
        Ok(located)
    }

    async fn state_parties(&self, conflicts: &[ConflictId]) -> Result<Vec<PartyLink>, GraphError> {
        if conflicts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = conflicts.iter().map(|c| c.0.clone()).collect();
        let q = query(
            "UNWIND $conflict_ids AS conflict_id
             MATCH (sa:StateActor)-[:IS_PARTY_TO_CONFLICT]-(c:Conflict)
             WHERE elementId(c) = conflict_id
             RETURN DISTINCT conflict_id, elementId(sa) AS id, sa.name AS name
             ORDER BY conflict_id, name, id",
        )
        .param("conflict_ids", ids);

        let rows = self.query_rows(q).await?;
        let mut links = Vec::with_capacity(rows.len());
        for row in rows {
            links.push(PartyLink {
                conflict_id: ConflictId(required(&row, "conflict_id")?),
                state_actor: StateActor {
                    id: StateActorId(required(&row, "id")?),
                    name: optional(&row, "name"),
                },
            });
        }
        Ok(links)
    }
}

fn required(row: &Row, column: &str) -> Result<String, GraphError> {
    row.get::<String>(column)
        .map_err(|e| GraphError::Serialization(format!("Failed to read column {column}: {e}")))
}

// Null properties fail to decode as String; treat them as absent.
fn optional(row: &Row, column: &str) -> Option<String> {
    row.get::<String>(column).ok()
}
