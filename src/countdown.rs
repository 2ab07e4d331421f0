use std::env;

use chrono::{DateTime, TimeZone, Utc};

/// Final Draw, Washington DC. The app is gated behind this instant.
pub fn default_draw_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 5, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Whole days / hours-within-day / minutes-within-hour / seconds-within-minute
/// of a millisecond delta. Zero or negative deltas decompose to all zeros.
pub fn time_left_ms(remaining_ms: i64) -> TimeLeft {
    if remaining_ms <= 0 {
        return TimeLeft::default();
    }
    let secs = remaining_ms / 1000;
    TimeLeft {
        days: secs / 86_400,
        hours: secs / 3600 % 24,
        minutes: secs / 60 % 60,
        seconds: secs % 60,
    }
}

/// Blocks the app until the target instant, then stays open for the rest of
/// the process even if the clock moves backwards.
#[derive(Debug, Clone)]
pub struct CountdownGate {
    target: DateTime<Utc>,
    open: bool,
}

impl CountdownGate {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            open: false,
        }
    }

    /// `DRAW_DATE` (RFC 3339) overrides the built-in target.
    pub fn from_env() -> Self {
        let target = env::var("DRAW_DATE")
            .ok()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(default_draw_date);
        Self::new(target)
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn is_open(&mut self, now: DateTime<Utc>) -> bool {
        if !self.open && now >= self.target {
            self.open = true;
        }
        self.open
    }

    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        time_left_ms((self.target - now).num_milliseconds())
    }
}
