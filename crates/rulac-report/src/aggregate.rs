//! Aggregation of join rows into per-region collections.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use rulac_core::types::UNKNOWN;
use rulac_core::{Conflict, ConflictId, Country, Region, StateActor, StateActorId};

use crate::resolve::Resolution;

/// The conflicts a state actor is party to, within the matched set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateActorConflicts {
    pub state_name: Option<String>,
    pub conflicts_involved: Vec<String>,
}

/// Deduplicated collections for one region and conflict type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionAggregate {
    pub region: Region,
    pub conflict_type: String,
    pub all_region_countries: Vec<Country>,
    pub conflicts: Vec<Conflict>,
    pub conflict_countries: Vec<Country>,
    pub state_actors: Vec<StateActor>,
    pub total_distinct_conflicts: usize,
    pub state_actor_conflict_details: Vec<StateActorConflicts>,
    /// Distinct (conflict, state actor) party relations seen in the rows.
    #[serde(skip)]
    pub party_links: Vec<(ConflictId, StateActorId)>,
}

impl RegionAggregate {
    /// State actors party to the given conflict, in `state_actors` order.
    pub fn parties_of<'a>(
        &'a self,
        conflict_id: &'a ConflictId,
    ) -> impl Iterator<Item = &'a StateActor> + 'a {
        self.state_actors.iter().filter(move |actor| {
            self.party_links
                .iter()
                .any(|(c, a)| c == conflict_id && *a == actor.id)
        })
    }
}

/// Insertion-ordered collection keyed by identifier.
struct Distinct<K, T> {
    seen: HashSet<K>,
    items: Vec<T>,
}

impl<K: Eq + Hash, T> Distinct<K, T> {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, key: K, item: impl FnOnce() -> T) {
        if self.seen.insert(key) {
            self.items.push(item());
        }
    }
}

/// Collapse the join rows of one region into deduplicated collections.
///
/// Ordering follows first encounter in the row stream.
pub fn aggregate(resolution: Resolution, conflict_type: &str) -> RegionAggregate {
    let mut countries = Distinct::new();
    let mut conflicts = Distinct::new();
    let mut conflict_countries = Distinct::new();
    let mut state_actors = Distinct::new();
    let mut party_links = Distinct::new();

    for row in &resolution.rows {
        if let Some(country) = &row.country {
            countries.push(country.id.clone(), || country.clone());
        }
        let Some(conflict) = &row.conflict else {
            continue;
        };
        conflicts.push(conflict.id.clone(), || conflict.clone());
        if let Some(country) = &row.country {
            conflict_countries.push(country.id.clone(), || country.clone());
        }
        if let Some(actor) = &row.state_actor {
            state_actors.push(actor.id.clone(), || actor.clone());
            let link = (conflict.id.clone(), actor.id.clone());
            party_links.push(link.clone(), || link);
        }
    }

    let conflicts: Vec<Conflict> = conflicts.items;
    let state_actors: Vec<StateActor> = state_actors.items;
    let party_links: Vec<(ConflictId, StateActorId)> = party_links.items;

    let state_actor_conflict_details = state_actors
        .iter()
        .map(|actor| StateActorConflicts {
            state_name: actor.name.clone(),
            conflicts_involved: conflicts
                .iter()
                .filter(|c| {
                    party_links
                        .iter()
                        .any(|(cid, aid)| *cid == c.id && *aid == actor.id)
                })
                .map(|c| c.name.clone().unwrap_or_else(|| UNKNOWN.to_string()))
                .collect(),
        })
        .collect();

    RegionAggregate {
        region: resolution.region,
        conflict_type: conflict_type.to_string(),
        all_region_countries: countries.items,
        total_distinct_conflicts: conflicts.len(),
        conflicts,
        conflict_countries: conflict_countries.items,
        state_actors,
        state_actor_conflict_details,
        party_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulac_core::{CountryId, RegionCode};

    use crate::resolve::JoinRow;

    fn region() -> Region {
        Region {
            code: RegionCode("150".to_string()),
            name: "Europe".to_string(),
        }
    }

    fn country(id: &str, name: &str) -> Country {
        Country {
            id: CountryId(id.to_string()),
            name: Some(name.to_string()),
        }
    }

    fn conflict(id: &str, name: Option<&str>) -> Conflict {
        Conflict {
            id: ConflictId(id.to_string()),
            name: name.map(str::to_string),
            overview: None,
            applicable_law: None,
            citation: None,
        }
    }

    fn actor(id: &str, name: &str) -> StateActor {
        StateActor {
            id: StateActorId(id.to_string()),
            name: Some(name.to_string()),
        }
    }

    fn row(country: &Country, conflict: Option<&Conflict>, actor: Option<&StateActor>) -> JoinRow {
        JoinRow {
            country: Some(country.clone()),
            conflict: conflict.cloned(),
            state_actor: actor.cloned(),
        }
    }

    #[test]
    fn test_aggregate_anchor_only() {
        let resolution = Resolution {
            region: region(),
            rows: vec![JoinRow {
                country: None,
                conflict: None,
                state_actor: None,
            }],
        };
        let agg = aggregate(resolution, "Military Occupation");

        assert!(agg.all_region_countries.is_empty());
        assert!(agg.conflicts.is_empty());
        assert!(agg.state_actors.is_empty());
        assert!(agg.state_actor_conflict_details.is_empty());
        assert_eq!(agg.total_distinct_conflicts, 0);
    }

    #[test]
    fn test_aggregate_deduplicates_by_id() {
        let ua = country("ua", "Ukraine");
        let md = country("md", "Moldova");
        let c1 = conflict("c1", Some("Russia-Ukraine"));
        let ru = actor("ru", "Russia");

        // c1 spans two countries; Ukraine appears once per party.
        let resolution = Resolution {
            region: region(),
            rows: vec![
                row(&ua, Some(&c1), Some(&ru)),
                row(&ua, Some(&c1), Some(&actor("ua-state", "Ukraine"))),
                row(&md, Some(&c1), Some(&ru)),
            ],
        };
        let agg = aggregate(resolution, "International Armed Conflict (IAC)");

        assert_eq!(agg.all_region_countries, vec![ua.clone(), md.clone()]);
        assert_eq!(agg.conflict_countries, vec![ua, md]);
        assert_eq!(agg.total_distinct_conflicts, 1);
        assert_eq!(agg.state_actors.len(), 2);
        assert_eq!(agg.party_links.len(), 2);
    }

    #[test]
    fn test_countries_independent_of_conflicts() {
        let fr = country("fr", "France");
        let de = country("de", "Germany");
        let c1 = conflict("c1", Some("Border dispute"));

        let resolution = Resolution {
            region: region(),
            rows: vec![row(&fr, None, None), row(&de, Some(&c1), None)],
        };
        let agg = aggregate(resolution, "International Armed Conflict (IAC)");

        assert_eq!(agg.all_region_countries.len(), 2);
        assert_eq!(agg.conflict_countries, vec![de]);
        assert!(agg.state_actors.is_empty());
        assert!(agg.state_actor_conflict_details.is_empty());
    }

    #[test]
    fn test_state_actor_conflict_index() {
        let ua = country("ua", "Ukraine");
        let c1 = conflict("c1", Some("First"));
        let c2 = conflict("c2", None);
        let ru = actor("ru", "Russia");
        let by = actor("by", "Belarus");

        let resolution = Resolution {
            region: region(),
            rows: vec![
                row(&ua, Some(&c1), Some(&ru)),
                row(&ua, Some(&c1), Some(&by)),
                row(&ua, Some(&c2), Some(&ru)),
            ],
        };
        let agg = aggregate(resolution, "International Armed Conflict (IAC)");

        assert_eq!(
            agg.state_actor_conflict_details,
            vec![
                StateActorConflicts {
                    state_name: Some("Russia".to_string()),
                    conflicts_involved: vec!["First".to_string(), UNKNOWN.to_string()],
                },
                StateActorConflicts {
                    state_name: Some("Belarus".to_string()),
                    conflicts_involved: vec!["First".to_string()],
                },
            ]
        );

        let c2_parties: Vec<_> = agg.parties_of(&c2.id).map(|a| a.id.0.as_str()).collect();
        assert_eq!(c2_parties, vec!["ru"]);
    }
}
