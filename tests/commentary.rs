use std::time::Duration;

use chrono::Utc;
use wc26_companion::commentary::{
    build_prompt, commentary_kind, fallback_text, parse_generate_text, resolve_commentary,
    CommentaryConfig, CommentaryKind, CommentaryRequest, MatchContext, FALLBACK_NO_KEY,
};
use wc26_companion::state::{apply_delta, AppState, Delta, Match, MatchStatus, Team};

fn sample_match(status: MatchStatus) -> Match {
    Match {
        id: 42,
        group: "Group B".to_string(),
        team_a: Team {
            name: "Brazil".to_string(),
            code: "BR".to_string(),
        },
        team_b: Team {
            name: "Germany".to_string(),
            code: "DE".to_string(),
        },
        date: Utc::now(),
        stadium: "MetLife Stadium".to_string(),
        city: "New York / New Jersey".to_string(),
        country: "USA".to_string(),
        score_a: Some(2),
        score_b: Some(1),
        status,
    }
}

#[test]
fn kind_follows_match_state() {
    assert_eq!(
        commentary_kind(&sample_match(MatchStatus::Finished)),
        CommentaryKind::Highlight
    );
    assert_eq!(
        commentary_kind(&sample_match(MatchStatus::Scheduled)),
        CommentaryKind::Preview
    );
    assert_eq!(
        commentary_kind(&sample_match(MatchStatus::InProgress)),
        CommentaryKind::Preview
    );

    let mut undrawn = sample_match(MatchStatus::Scheduled);
    undrawn.team_a = Team::placeholder();
    undrawn.team_b = Team::placeholder();
    assert_eq!(commentary_kind(&undrawn), CommentaryKind::Venue);
}

#[test]
fn missing_credential_yields_fallback_for_every_variant() {
    let cfg = CommentaryConfig {
        api_key: None,
        timeout: Duration::from_secs(5),
    };
    let context = MatchContext::from_match(&sample_match(MatchStatus::Finished));

    for kind in [
        CommentaryKind::Highlight,
        CommentaryKind::Preview,
        CommentaryKind::Venue,
    ] {
        let request = CommentaryRequest {
            match_id: 42,
            seq: 1,
            kind,
            context: context.clone(),
        };
        let text = resolve_commentary(&cfg, &request).expect("no-key path never errors");
        assert_eq!(text, FALLBACK_NO_KEY);
        assert!(!text.is_empty());
        assert!(!fallback_text(kind).is_empty());
    }
}

#[test]
fn prompts_carry_the_match_context() {
    let context = MatchContext::from_match(&sample_match(MatchStatus::Finished));

    let highlight = build_prompt(CommentaryKind::Highlight, &context);
    assert!(highlight.contains("Brazil"));
    assert!(highlight.contains("Germany"));
    assert!(highlight.contains("Brazil 2 - 1 Germany"));

    let preview = build_prompt(CommentaryKind::Preview, &context);
    assert!(preview.contains("Brazil"));
    assert!(preview.contains("key player"));

    let venue = build_prompt(CommentaryKind::Venue, &context);
    assert!(venue.contains("MetLife Stadium"));
    assert!(venue.contains("New York / New Jersey"));
    assert!(venue.contains("not yet known"));
}

#[test]
fn parse_generate_text_reads_candidate_parts() {
    let raw = r#"{"candidates":[{"content":{"parts":[{"text":"A thriller."},{"text":" Late goal."}]}}]}"#;
    assert_eq!(parse_generate_text(raw).unwrap(), "A thriller. Late goal.");
}

#[test]
fn parse_generate_text_rejects_empty_replies() {
    assert!(parse_generate_text("").is_err());
    assert!(parse_generate_text("null").is_err());
    assert!(parse_generate_text(r#"{"candidates":[]}"#).is_err());
    assert!(parse_generate_text(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).is_err());
}

#[test]
fn stale_commentary_result_is_ignored() {
    let mut state = AppState::new();
    let seq1 = state.begin_commentary(9);
    let seq2 = state.begin_commentary(9);
    assert_ne!(seq1, seq2);

    apply_delta(
        &mut state,
        Delta::SetCommentary {
            match_id: 9,
            seq: seq1,
            text: "old".to_string(),
        },
    );
    assert!(state.commentary.get(&9).is_none());
    assert!(state.commentary_loading.contains(&9));

    apply_delta(
        &mut state,
        Delta::SetCommentary {
            match_id: 9,
            seq: seq2,
            text: "new".to_string(),
        },
    );
    assert_eq!(state.commentary.get(&9).map(String::as_str), Some("new"));
    assert!(!state.commentary_loading.contains(&9));
}

#[test]
fn new_request_replaces_prior_output() {
    let mut state = AppState::new();
    let seq = state.begin_commentary(3);
    apply_delta(
        &mut state,
        Delta::SetCommentary {
            match_id: 3,
            seq,
            text: "first".to_string(),
        },
    );
    assert_eq!(state.commentary.get(&3).map(String::as_str), Some("first"));

    state.begin_commentary(3);
    assert!(state.commentary.get(&3).is_none());
    assert!(state.commentary_loading.contains(&3));
}
