//! Report rendering: prose summary and per-conflict details.
//!
//! Every function here is total. Missing source values are replaced by the
//! defaults in [`rulac_core::types`], never left empty.

use rulac_core::types::{NOT_SPECIFIED, NO_CITATION, NO_OVERVIEW, NO_STATE_ACTORS, UNKNOWN};
use rulac_core::{Conflict, ConflictDetail, PartyScope, Report};

use crate::aggregate::RegionAggregate;

/// "<region> is defined by UN M49 code <code> and includes <N> countries total: <names>."
///
/// Countries without a name count toward N but are left out of the list.
pub fn region_summary(agg: &RegionAggregate) -> String {
    let names: Vec<&str> = agg
        .all_region_countries
        .iter()
        .filter_map(|c| c.name.as_deref())
        .collect();
    format!(
        "{} is defined by UN M49 code {} and includes {} countries total: {}.",
        agg.region.name,
        agg.region.code,
        agg.all_region_countries.len(),
        names.join(", ")
    )
}

/// The RULAC sentence plus a per-state-actor breakdown.
pub fn summary_text(agg: &RegionAggregate) -> String {
    let conflict_type = &agg.conflict_type;
    let region_name = &agg.region.name;

    if agg.total_distinct_conflicts == 0 {
        return format!(
            "According to RULAC, there are currently no recorded {conflict_type} taking place in {region_name}."
        );
    }

    let breakdown: Vec<String> = agg
        .state_actor_conflict_details
        .iter()
        .map(|entry| {
            format!(
                "{} is a state actor involved in {} {conflict_type} ({}).",
                entry.state_name.as_deref().unwrap_or(UNKNOWN),
                entry.conflicts_involved.len(),
                entry.conflicts_involved.join(", ")
            )
        })
        .collect();

    format!(
        "According to RULAC, there is currently {} total distinct conflict(s) classified as a {conflict_type} taking place in {region_name}. By country breakdown: {}",
        agg.total_distinct_conflicts,
        breakdown.join(" ")
    )
}

/// One [`ConflictDetail`] per matched conflict.
pub fn conflict_details(agg: &RegionAggregate, scope: PartyScope) -> Vec<ConflictDetail> {
    let region_parties = join_or_default(
        agg.state_actor_conflict_details
            .iter()
            .filter_map(|entry| entry.state_name.as_deref()),
    );

    agg.conflicts
        .iter()
        .map(|conflict| {
            let state_parties = match scope {
                PartyScope::RegionWide => region_parties.clone(),
                PartyScope::PerConflict => join_or_default(
                    agg.parties_of(&conflict.id)
                        .filter_map(|actor| actor.name.as_deref()),
                ),
            };
            detail(conflict, &agg.conflict_type, state_parties)
        })
        .collect()
}

fn detail(conflict: &Conflict, conflict_type: &str, state_parties: String) -> ConflictDetail {
    ConflictDetail {
        conflict_name: or_default(&conflict.name, UNKNOWN),
        conflict_classification: conflict_type.to_string(),
        conflict_overview: or_default(&conflict.overview, NO_OVERVIEW),
        applicable_ihl_law: or_default(&conflict.applicable_law, NOT_SPECIFIED),
        conflict_citation: or_default(&conflict.citation, NO_CITATION),
        state_parties,
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

fn join_or_default<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        NO_STATE_ACTORS.to_string()
    } else {
        names.join(", ")
    }
}

/// Render the complete report from an aggregate.
pub fn render(agg: &RegionAggregate, scope: PartyScope) -> Report {
    Report {
        summary: format!("{} {}", region_summary(agg), summary_text(agg)),
        conflict_details: conflict_details(agg, scope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulac_core::{ConflictId, Country, CountryId, Region, RegionCode, StateActor, StateActorId};

    use crate::aggregate::StateActorConflicts;

    const OCCUPATION: &str = "Military Occupation";

    fn empty_aggregate() -> RegionAggregate {
        RegionAggregate {
            region: Region {
                code: RegionCode("145".to_string()),
                name: "Western Asia".to_string(),
            },
            conflict_type: OCCUPATION.to_string(),
            all_region_countries: vec![
                Country {
                    id: CountryId("cy".to_string()),
                    name: Some("Cyprus".to_string()),
                },
                Country {
                    id: CountryId("sy".to_string()),
                    name: Some("Syria".to_string()),
                },
            ],
            conflicts: Vec::new(),
            conflict_countries: Vec::new(),
            state_actors: Vec::new(),
            total_distinct_conflicts: 0,
            state_actor_conflict_details: Vec::new(),
            party_links: Vec::new(),
        }
    }

    fn conflict(id: &str, name: &str) -> Conflict {
        Conflict {
            id: ConflictId(id.to_string()),
            name: Some(name.to_string()),
            overview: Some(format!("{name} overview")),
            applicable_law: None,
            citation: None,
        }
    }

    fn actor(id: &str, name: Option<&str>) -> StateActor {
        StateActor {
            id: StateActorId(id.to_string()),
            name: name.map(str::to_string),
        }
    }

    fn two_conflict_aggregate() -> RegionAggregate {
        let mut agg = empty_aggregate();
        agg.conflicts = vec![conflict("c1", "Northern Cyprus"), conflict("c2", "Golan")];
        agg.total_distinct_conflicts = 2;
        agg.state_actors = vec![actor("tr", Some("Turkey")), actor("il", Some("Israel"))];
        agg.state_actor_conflict_details = vec![
            StateActorConflicts {
                state_name: Some("Turkey".to_string()),
                conflicts_involved: vec!["Northern Cyprus".to_string()],
            },
            StateActorConflicts {
                state_name: Some("Israel".to_string()),
                conflicts_involved: vec!["Golan".to_string()],
            },
        ];
        agg.party_links = vec![
            (ConflictId("c1".to_string()), StateActorId("tr".to_string())),
            (ConflictId("c2".to_string()), StateActorId("il".to_string())),
        ];
        agg
    }

    #[test]
    fn test_region_summary_lists_all_countries() {
        assert_eq!(
            region_summary(&empty_aggregate()),
            "Western Asia is defined by UN M49 code 145 and includes 2 countries total: Cyprus, Syria."
        );
    }

    #[test]
    fn test_region_summary_without_countries() {
        let mut agg = empty_aggregate();
        agg.all_region_countries.clear();
        assert_eq!(
            region_summary(&agg),
            "Western Asia is defined by UN M49 code 145 and includes 0 countries total: ."
        );
    }

    #[test]
    fn test_region_summary_counts_unnamed_country() {
        let mut agg = empty_aggregate();
        agg.all_region_countries[0].name = None;
        assert_eq!(
            region_summary(&agg),
            "Western Asia is defined by UN M49 code 145 and includes 2 countries total: Syria."
        );
    }

    #[test]
    fn test_summary_text_no_conflicts() {
        assert_eq!(
            summary_text(&empty_aggregate()),
            "According to RULAC, there are currently no recorded Military Occupation taking place in Western Asia."
        );
    }

    #[test]
    fn test_summary_text_breakdown() {
        assert_eq!(
            summary_text(&two_conflict_aggregate()),
            "According to RULAC, there is currently 2 total distinct conflict(s) classified as a \
             Military Occupation taking place in Western Asia. By country breakdown: \
             Turkey is a state actor involved in 1 Military Occupation (Northern Cyprus). \
             Israel is a state actor involved in 1 Military Occupation (Golan)."
        );
    }

    #[test]
    fn test_summary_text_conflicts_without_parties() {
        let mut agg = two_conflict_aggregate();
        agg.state_actors.clear();
        agg.state_actor_conflict_details.clear();
        agg.party_links.clear();

        let text = summary_text(&agg);
        assert!(text.starts_with("According to RULAC, there is currently 2 total distinct conflict(s)"));
        assert!(text.ends_with("By country breakdown: "));
    }

    #[test]
    fn test_region_wide_party_scope() {
        let details = conflict_details(&two_conflict_aggregate(), PartyScope::RegionWide);
        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.state_parties == "Turkey, Israel"));
    }

    #[test]
    fn test_per_conflict_party_scope() {
        let details = conflict_details(&two_conflict_aggregate(), PartyScope::PerConflict);
        assert_eq!(details[0].state_parties, "Turkey");
        assert_eq!(details[1].state_parties, "Israel");
    }

    #[test]
    fn test_nameless_actor_skipped_in_parties() {
        let mut agg = two_conflict_aggregate();
        agg.state_actor_conflict_details[0].state_name = None;
        agg.state_actors[0].name = None;

        let details = conflict_details(&agg, PartyScope::RegionWide);
        assert_eq!(details[0].state_parties, "Israel");

        let per_conflict = conflict_details(&agg, PartyScope::PerConflict);
        assert_eq!(per_conflict[0].state_parties, NO_STATE_ACTORS);
        assert!(summary_text(&agg).contains("Unknown is a state actor involved in 1"));
    }

    #[test]
    fn test_detail_defaults() {
        let mut agg = two_conflict_aggregate();
        agg.conflicts[0] = Conflict {
            id: ConflictId("c1".to_string()),
            name: None,
            overview: None,
            applicable_law: None,
            citation: None,
        };

        let detail = &conflict_details(&agg, PartyScope::RegionWide)[0];
        assert_eq!(detail.conflict_name, UNKNOWN);
        assert_eq!(detail.conflict_classification, OCCUPATION);
        assert_eq!(detail.conflict_overview, NO_OVERVIEW);
        assert_eq!(detail.applicable_ihl_law, NOT_SPECIFIED);
        assert_eq!(detail.conflict_citation, NO_CITATION);
    }

    #[test]
    fn test_render_joins_summary_parts() {
        let report = render(&empty_aggregate(), PartyScope::RegionWide);
        assert!(report.summary.starts_with("Western Asia is defined by UN M49 code 145"));
        assert!(report
            .summary
            .contains("Cyprus, Syria. According to RULAC, there are currently no recorded"));
        assert!(report.conflict_details.is_empty());
    }
}
