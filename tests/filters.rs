use chrono::{DateTime, Duration, Utc};
use wc26_companion::state::{self, Match, MatchStatus, Team};

fn match_at(id: u32, date: DateTime<Utc>, status: MatchStatus) -> Match {
    Match {
        id,
        group: "Group A".to_string(),
        team_a: Team {
            name: "Brazil".to_string(),
            code: "BR".to_string(),
        },
        team_b: Team {
            name: "Germany".to_string(),
            code: "DE".to_string(),
        },
        date,
        stadium: "Estadio Azteca".to_string(),
        city: "Mexico City".to_string(),
        country: "Mexico".to_string(),
        score_a: None,
        score_b: None,
        status,
    }
}

fn fixture() -> Vec<Match> {
    let now = Utc::now();
    vec![
        match_at(1, now, MatchStatus::Scheduled),
        match_at(2, now - Duration::days(1), MatchStatus::Finished),
        match_at(3, now - Duration::days(1), MatchStatus::Scheduled),
        match_at(4, now + Duration::days(1), MatchStatus::Scheduled),
        match_at(5, now, MatchStatus::Finished),
    ]
}

fn ids(matches: &[&Match]) -> Vec<u32> {
    matches.iter().map(|m| m.id).collect()
}

#[test]
fn day_buckets_follow_local_calendar_dates() {
    let matches = fixture();
    let today = state::local_day(&Utc::now());

    assert_eq!(ids(&state::todays_matches(&matches, today)), vec![1]);
    assert_eq!(ids(&state::yesterdays_highlights(&matches, today)), vec![2]);
    assert_eq!(ids(&state::upcoming_fixtures(&matches, today)), vec![1, 4]);
}

#[test]
fn upcoming_keeps_the_overlap_with_today() {
    let matches = fixture();
    let today = state::local_day(&Utc::now());

    let todays = ids(&state::todays_matches(&matches, today));
    let upcoming = ids(&state::upcoming_fixtures(&matches, today));
    // Today's scheduled matches stay in the general upcoming list too.
    assert!(todays.contains(&1));
    assert!(upcoming.contains(&1));
}

#[test]
fn filters_are_idempotent_for_a_fixed_today() {
    let matches = fixture();
    let today = state::local_day(&Utc::now());

    assert_eq!(
        ids(&state::todays_matches(&matches, today)),
        ids(&state::todays_matches(&matches, today))
    );
    assert_eq!(
        ids(&state::yesterdays_highlights(&matches, today)),
        ids(&state::yesterdays_highlights(&matches, today))
    );
    assert_eq!(
        ids(&state::upcoming_fixtures(&matches, today)),
        ids(&state::upcoming_fixtures(&matches, today))
    );
}

#[test]
fn home_rows_concatenate_sections_in_render_order() {
    let matches = fixture();
    let today = state::local_day(&Utc::now());

    assert_eq!(ids(&state::home_rows(&matches, today)), vec![1, 2, 1, 4]);
}

#[test]
fn finished_matches_never_count_as_upcoming() {
    let matches = fixture();
    let today = state::local_day(&Utc::now());

    let upcoming = ids(&state::upcoming_fixtures(&matches, today));
    assert!(!upcoming.contains(&5));
    assert!(!upcoming.contains(&2));
}
