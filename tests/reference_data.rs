use std::collections::{HashMap, HashSet};

use wc26_companion::data::{country_flag_code, flag_emoji, GROUPS, MATCHES, STADIUMS, TEAMS};
use wc26_companion::state::MatchStatus;

#[test]
fn match_ids_are_unique_and_dense() {
    assert_eq!(MATCHES.len(), 104);
    let ids: HashSet<u32> = MATCHES.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), MATCHES.len());
    for id in 1..=104 {
        assert!(ids.contains(&id), "missing match id {id}");
    }
}

#[test]
fn every_match_city_resolves_to_exactly_one_stadium() {
    let mut by_city: HashMap<&str, Vec<&str>> = HashMap::new();
    for s in STADIUMS.iter() {
        by_city.entry(s.city.as_str()).or_default().push(s.name.as_str());
    }
    for (city, names) in &by_city {
        assert_eq!(names.len(), 1, "ambiguous stadium lookup for {city}");
    }
    for m in MATCHES.iter() {
        let names = by_city
            .get(m.city.as_str())
            .unwrap_or_else(|| panic!("no stadium for {}", m.city));
        assert_eq!(names[0], m.stadium);
    }
}

#[test]
fn schedule_starts_as_undrawn_fixtures() {
    for m in MATCHES.iter() {
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert!(m.team_a.is_placeholder());
        assert!(m.team_b.is_placeholder());
        assert!(m.score_a.is_none());
        assert!(m.score_b.is_none());
    }
}

#[test]
fn groups_are_twelve_placeholder_quartets() {
    assert_eq!(GROUPS.len(), 12);
    assert_eq!(GROUPS.first().map(|g| g.name.as_str()), Some("Group A"));
    assert_eq!(GROUPS.last().map(|g| g.name.as_str()), Some("Group L"));
    for g in GROUPS.iter() {
        assert_eq!(g.teams.len(), 4);
        assert!(g.teams.iter().all(|t| t.is_placeholder()));
    }
}

#[test]
fn team_table_has_distinct_codes() {
    assert_eq!(TEAMS.len(), 48);
    let codes: HashSet<&str> = TEAMS.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes.len(), TEAMS.len());
    assert!(TEAMS.iter().all(|t| !t.is_placeholder()));
}

#[test]
fn stadium_capacities_are_positive() {
    assert_eq!(STADIUMS.len(), 16);
    assert!(STADIUMS.iter().all(|s| s.capacity > 0));
}

#[test]
fn country_flag_code_is_a_display_heuristic() {
    assert_eq!(country_flag_code("USA"), "US");
    assert_eq!(country_flag_code("Canada"), "CA");
    // First-two-letters fallback, wrong flags included; it is display only.
    assert_eq!(country_flag_code("Mexico"), "ME");
}

#[test]
fn flag_emoji_maps_to_regional_indicators() {
    assert_eq!(flag_emoji("BR"), "\u{1F1E7}\u{1F1F7}");
    assert_eq!(flag_emoji("us"), "\u{1F1FA}\u{1F1F8}");
}
