//! In-memory conflict graph.
//!
//! Holds regions, countries, conflicts, and state actors in insertion order
//! with id → index maps for lookups. Reads return entities in the order they
//! were added, which keeps report output reproducible in fixtures.

use std::collections::HashMap;

use rulac_core::{
    Conflict, ConflictId, Country, CountryId, Region, RegionCode, StateActor, StateActorId,
};

use crate::access::{ConflictGraph, LocatedConflict, PartyLink};
use crate::client::GraphError;

#[derive(Debug, Clone)]
struct CountryNode {
    country: Country,
    region: RegionCode,
}

#[derive(Debug, Clone)]
struct ConflictNode {
    conflict: Conflict,
    conflict_type: Option<String>,
    /// `IS_TAKING_PLACE_IN_COUNTRY` targets.
    countries: Vec<CountryId>,
    /// Indices into `state_actors` of `IS_PARTY_TO_CONFLICT` sources.
    parties: Vec<usize>,
}

/// An immutable-once-built conflict graph held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    regions: Vec<Region>,
    countries: Vec<CountryNode>,
    conflicts: Vec<ConflictNode>,
    state_actors: Vec<StateActor>,
    conflict_index: HashMap<ConflictId, usize>,
    actor_index: HashMap<StateActorId, usize>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, code: &str, name: &str) -> Self {
        self.regions.push(Region {
            code: RegionCode(code.to_string()),
            name: name.to_string(),
        });
        self
    }

    /// Add a country belonging to `region`.
    pub fn with_country(self, region: &str, id: &str, name: &str) -> Self {
        self.push_country(region, id, Some(name))
    }

    /// Add a country belonging to `region` whose `name` property is unset.
    pub fn with_unnamed_country(self, region: &str, id: &str) -> Self {
        self.push_country(region, id, None)
    }

    fn push_country(mut self, region: &str, id: &str, name: Option<&str>) -> Self {
        self.countries.push(CountryNode {
            country: Country {
                id: CountryId(id.to_string()),
                name: name.map(str::to_string),
            },
            region: RegionCode(region.to_string()),
        });
        self
    }

    /// Add a conflict classified as `conflict_type` (unclassified when `None`).
    pub fn with_conflict(mut self, conflict: Conflict, conflict_type: Option<&str>) -> Self {
        self.conflict_index.insert(conflict.id.clone(), self.conflicts.len());
        self.conflicts.push(ConflictNode {
            conflict,
            conflict_type: conflict_type.map(str::to_string),
            countries: Vec::new(),
            parties: Vec::new(),
        });
        self
    }

    /// Record that a conflict takes place in a country. Unknown conflicts are ignored.
    pub fn with_location(mut self, conflict_id: &str, country_id: &str) -> Self {
        if let Some(&idx) = self.conflict_index.get(&ConflictId(conflict_id.to_string())) {
            self.conflicts[idx]
                .countries
                .push(CountryId(country_id.to_string()));
        }
        self
    }

    pub fn with_state_actor(mut self, id: &str, name: Option<&str>) -> Self {
        let actor = StateActor {
            id: StateActorId(id.to_string()),
            name: name.map(str::to_string),
        };
        self.actor_index.insert(actor.id.clone(), self.state_actors.len());
        self.state_actors.push(actor);
        self
    }

    /// Record that a state actor is party to a conflict. Unknown ids are ignored.
    pub fn with_party(mut self, actor_id: &str, conflict_id: &str) -> Self {
        let actor = self.actor_index.get(&StateActorId(actor_id.to_string()));
        let conflict = self.conflict_index.get(&ConflictId(conflict_id.to_string()));
        if let (Some(&a), Some(&c)) = (actor, conflict) {
            if !self.conflicts[c].parties.contains(&a) {
                self.conflicts[c].parties.push(a);
            }
        }
        self
    }
}

#[async_trait::async_trait]
impl ConflictGraph for InMemoryGraph {
    async fn region_by_code(&self, code: &RegionCode) -> Result<Option<Region>, GraphError> {
        Ok(self.regions.iter().find(|r| &r.code == code).cloned())
    }

    async fn countries_in_region(&self, code: &RegionCode) -> Result<Vec<Country>, GraphError> {
        Ok(self
            .countries
            .iter()
            .filter(|n| &n.region == code)
            .map(|n| n.country.clone())
            .collect())
    }

    async fn conflicts_in_countries(
        &self,
        countries: &[CountryId],
        conflict_type: Option<&str>,
    ) -> Result<Vec<LocatedConflict>, GraphError> {
        let mut located = Vec::new();
        for country_id in countries {
            for node in &self.conflicts {
                if !node.countries.contains(country_id) {
                    continue;
                }
                if let Some(wanted) = conflict_type {
                    if node.conflict_type.as_deref() != Some(wanted) {
                        continue;
                    }
                }
                located.push(LocatedConflict {
                    country_id: country_id.clone(),
                    conflict: node.conflict.clone(),
                    conflict_type: node.conflict_type.clone(),
                });
            }
        }
        Ok(located)
    }

    async fn state_parties(&self, conflicts: &[ConflictId]) -> Result<Vec<PartyLink>, GraphError> {
        let mut links = Vec::new();
        for conflict_id in conflicts {
            let Some(&idx) = self.conflict_index.get(conflict_id) else {
                continue;
            };
            for &actor in &self.conflicts[idx].parties {
                links.push(PartyLink {
                    conflict_id: conflict_id.clone(),
                    state_actor: self.state_actors[actor].clone(),
                });
            }
        }
        Ok(links)
    }
}
