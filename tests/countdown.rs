use chrono::{Duration, TimeZone, Utc};
use wc26_companion::countdown::{time_left_ms, CountdownGate, TimeLeft};

#[test]
fn decomposes_milliseconds_into_calendar_parts() {
    // 1d 1h 1m 1s 1ms floors to whole seconds.
    assert_eq!(
        time_left_ms(90_061_001),
        TimeLeft {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1,
        }
    );
}

#[test]
fn zero_and_negative_deltas_decompose_to_zeros() {
    assert_eq!(time_left_ms(0), TimeLeft::default());
    assert_eq!(time_left_ms(-5_000), TimeLeft::default());
    assert!(time_left_ms(999).is_zero());
}

#[test]
fn hours_minutes_seconds_wrap_within_their_units() {
    let left = time_left_ms((((3 * 24 + 23) * 60 + 59) * 60 + 59) * 1000);
    assert_eq!(
        left,
        TimeLeft {
            days: 3,
            hours: 23,
            minutes: 59,
            seconds: 59,
        }
    );
}

#[test]
fn gate_opens_at_target_and_never_closes_again() {
    let target = Utc.with_ymd_and_hms(2025, 12, 5, 0, 0, 0).single().unwrap();
    let mut gate = CountdownGate::new(target);

    assert!(!gate.is_open(target - Duration::seconds(1)));
    assert!(gate.is_open(target));
    assert!(gate.is_open(target + Duration::days(30)));
    // A clock step backwards does not re-gate.
    assert!(gate.is_open(target - Duration::hours(2)));
}

#[test]
fn time_left_counts_down_to_the_target() {
    let target = Utc.with_ymd_and_hms(2025, 12, 5, 0, 0, 0).single().unwrap();
    let gate = CountdownGate::new(target);

    let now = target - Duration::milliseconds(90_061_001);
    assert_eq!(
        gate.time_left(now),
        TimeLeft {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1,
        }
    );
    assert_eq!(gate.time_left(target), TimeLeft::default());
    assert_eq!(gate.time_left(target + Duration::seconds(10)), TimeLeft::default());
}
