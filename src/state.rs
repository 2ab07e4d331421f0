use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::commentary::CommentaryRequest;

pub const PLACEHOLDER_CODE: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub code: String,
}

impl Team {
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_CODE.to_string(),
            code: PLACEHOLDER_CODE.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.code == PLACEHOLDER_CODE
    }
}

#[derive(Debug, Clone)]
pub struct Stadium {
    pub name: String,
    pub city: String,
    pub country: String,
    pub capacity: u32,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: u32,
    pub group: String,
    pub team_a: Team,
    pub team_b: Team,
    pub date: DateTime<Utc>,
    pub stadium: String,
    pub city: String,
    pub country: String,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub teams: [Team; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub match_id: u32,
    pub score_a: u32,
    pub score_b: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Groups,
    Stadiums,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    TeamA,
    TeamB,
}

/// Score editor bound to one match while open.
#[derive(Debug, Clone)]
pub struct PredictionEditor {
    pub match_id: u32,
    pub score_a: u32,
    pub score_b: u32,
    pub focus: EditorFocus,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    pub session: Option<Session>,
    pub predictions: Vec<Prediction>,
    pub selected: usize,
    pub stadiums_scroll: u16,
    pub login_open: bool,
    pub login_input: String,
    pub editor: Option<PredictionEditor>,
    pub commentary: HashMap<u32, String>,
    pub commentary_loading: HashSet<u32>,
    pub commentary_seq: HashMap<u32, u64>,
    pub next_commentary_seq: u64,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Home,
            session: None,
            predictions: Vec::new(),
            selected: 0,
            stadiums_scroll: 0,
            login_open: false,
            login_input: String::new(),
            editor: None,
            commentary: HashMap::with_capacity(16),
            commentary_loading: HashSet::new(),
            commentary_seq: HashMap::with_capacity(16),
            next_commentary_seq: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
        }
    }

    /// Blank names (after trimming) are a silent no-op; the prompt stays open.
    pub fn login(&mut self, raw: &str) {
        let name = raw.trim();
        if name.is_empty() {
            return;
        }
        self.session = Some(Session {
            username: name.to_string(),
        });
        self.login_open = false;
        self.login_input.clear();
        self.push_log(format!("[INFO] Logged in as {name}"));
    }

    /// Logging out discards the session's predictions, open editor included.
    pub fn logout(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        self.predictions.clear();
        self.editor = None;
        self.push_log("[INFO] Logged out");
    }

    pub fn prediction_for(&self, match_id: u32) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.match_id == match_id)
    }

    pub fn can_predict(&self, m: &Match) -> bool {
        self.session.is_some()
            && m.status == MatchStatus::Scheduled
            && !m.team_a.is_placeholder()
            && !m.team_b.is_placeholder()
    }

    /// Binds the editor to `m`, seeded with the existing prediction (0-0 if none).
    pub fn open_prediction_editor(&mut self, m: &Match) {
        if !self.can_predict(m) {
            return;
        }
        let (score_a, score_b) = self
            .prediction_for(m.id)
            .map(|p| (p.score_a, p.score_b))
            .unwrap_or((0, 0));
        self.editor = Some(PredictionEditor {
            match_id: m.id,
            score_a,
            score_b,
            focus: EditorFocus::TeamA,
        });
    }

    /// Replace-on-save: at most one prediction per match id.
    pub fn save_prediction(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        self.predictions.retain(|p| p.match_id != editor.match_id);
        self.predictions.push(Prediction {
            match_id: editor.match_id,
            score_a: editor.score_a,
            score_b: editor.score_b,
        });
        self.push_log(format!(
            "[INFO] Prediction saved: match {} {}-{}",
            editor.match_id, editor.score_a, editor.score_b
        ));
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub fn editor_adjust(&mut self, step: i32) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let slot = match editor.focus {
            EditorFocus::TeamA => &mut editor.score_a,
            EditorFocus::TeamB => &mut editor.score_b,
        };
        *slot = if step >= 0 {
            slot.saturating_add(step as u32)
        } else {
            slot.saturating_sub(step.unsigned_abs())
        };
    }

    pub fn editor_toggle_focus(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.focus = match editor.focus {
                EditorFocus::TeamA => EditorFocus::TeamB,
                EditorFocus::TeamB => EditorFocus::TeamA,
            };
        }
    }

    /// Registers a new commentary request for a card and returns its sequence
    /// number. Prior output for the card is dropped so the slot never shows a
    /// superseded request's text.
    pub fn begin_commentary(&mut self, match_id: u32) -> u64 {
        self.next_commentary_seq += 1;
        let seq = self.next_commentary_seq;
        self.commentary_seq.insert(match_id, seq);
        self.commentary.remove(&match_id);
        self.commentary_loading.insert(match_id);
        seq
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self, total: usize) {
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self, total: usize) {
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Calendar day of a kickoff in the viewer's local time zone.
pub fn local_day(date: &DateTime<Utc>) -> NaiveDate {
    date.with_timezone(&Local).date_naive()
}

pub fn todays_matches<'a>(matches: &'a [Match], today: NaiveDate) -> Vec<&'a Match> {
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Scheduled && local_day(&m.date) == today)
        .collect()
}

pub fn yesterdays_highlights<'a>(matches: &'a [Match], today: NaiveDate) -> Vec<&'a Match> {
    let Some(yesterday) = today.pred_opt() else {
        return Vec::new();
    };
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Finished && local_day(&m.date) == yesterday)
        .collect()
}

/// Includes today's scheduled matches even though `todays_matches` already
/// lists them; the overlap is intentional.
pub fn upcoming_fixtures<'a>(matches: &'a [Match], today: NaiveDate) -> Vec<&'a Match> {
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Scheduled && local_day(&m.date) >= today)
        .collect()
}

/// Home view rows in render order: today, yesterday, upcoming.
pub fn home_rows<'a>(matches: &'a [Match], today: NaiveDate) -> Vec<&'a Match> {
    let mut rows = todays_matches(matches, today);
    rows.extend(yesterdays_highlights(matches, today));
    rows.extend(upcoming_fixtures(matches, today));
    rows
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetCommentary {
        match_id: u32,
        seq: u64,
        text: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchCommentary(CommentaryRequest),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetCommentary {
            match_id,
            seq,
            text,
        } => {
            // A result from a superseded request must neither show nor clear
            // the newer request's loading flag.
            if state.commentary_seq.get(&match_id) != Some(&seq) {
                return;
            }
            state.commentary_loading.remove(&match_id);
            state.commentary.insert(match_id, text);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
