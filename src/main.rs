use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{Local, Utc};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use wc26_companion::commentary::{self, commentary_kind, CommentaryKind, CommentaryRequest, MatchContext};
use wc26_companion::countdown::{CountdownGate, TimeLeft};
use wc26_companion::data;
use wc26_companion::state::{
    self, apply_delta, AppState, EditorFocus, Match, MatchStatus, PredictionEditor, Tab, Team,
};

struct App {
    state: AppState,
    gate: CountdownGate,
    gate_open: bool,
    time_left: TimeLeft,
    last_second_tick: Instant,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<state::ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<state::ProviderCommand>>) -> Self {
        let mut gate = CountdownGate::from_env();
        let now = Utc::now();
        let gate_open = gate.is_open(now);
        let time_left = gate.time_left(now);
        Self {
            state: AppState::new(),
            gate,
            gate_open,
            time_left,
            last_second_tick: Instant::now(),
            should_quit: false,
            cmd_tx,
        }
    }

    /// One countdown recomputation per second; the gate never closes again
    /// once it has opened.
    fn tick(&mut self) {
        if self.last_second_tick.elapsed() < Duration::from_secs(1) {
            return;
        }
        self.last_second_tick = Instant::now();
        if !self.gate_open {
            let now = Utc::now();
            self.gate_open = self.gate.is_open(now);
            self.time_left = self.gate.time_left(now);
        } else {
            // Home sections shift at local midnight.
            let total = home_rows().len();
            self.state.clamp_selection(total);
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if !self.gate_open {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }
        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.state.help_overlay = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }
        if self.state.login_open {
            self.on_login_key(key);
            return;
        }
        if self.state.editor.is_some() {
            self.on_editor_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_tab(Tab::Home),
            KeyCode::Char('2') => self.state.set_tab(Tab::Groups),
            KeyCode::Char('3') => self.state.set_tab(Tab::Stadiums),
            KeyCode::Char('l') | KeyCode::Char('L') => {
                if self.state.session.is_none() {
                    self.state.login_open = true;
                } else {
                    self.state.push_log("[INFO] Already logged in");
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => self.state.logout(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('g') => self.request_commentary(),
            KeyCode::Char('p') | KeyCode::Enter => self.open_editor(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let input = self.state.login_input.clone();
                self.state.login(&input);
            }
            KeyCode::Esc => {
                self.state.login_open = false;
                self.state.login_input.clear();
            }
            KeyCode::Backspace => {
                self.state.login_input.pop();
            }
            KeyCode::Char(c) => self.state.login_input.push(c),
            _ => {}
        }
    }

    fn on_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state.save_prediction(),
            KeyCode::Esc => self.state.close_editor(),
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => self.state.editor_adjust(1),
            KeyCode::Down | KeyCode::Char('-') => self.state.editor_adjust(-1),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => self.state.editor_toggle_focus(),
            _ => {}
        }
    }

    fn move_down(&mut self) {
        match self.state.tab {
            Tab::Home => {
                let total = home_rows().len();
                self.state.select_next(total);
            }
            Tab::Groups => {}
            Tab::Stadiums => {
                let max = data::STADIUMS.len().saturating_sub(1) as u16;
                if self.state.stadiums_scroll < max {
                    self.state.stadiums_scroll += 1;
                }
            }
        }
    }

    fn move_up(&mut self) {
        match self.state.tab {
            Tab::Home => {
                let total = home_rows().len();
                self.state.select_prev(total);
            }
            Tab::Groups => {}
            Tab::Stadiums => {
                self.state.stadiums_scroll = self.state.stadiums_scroll.saturating_sub(1);
            }
        }
    }

    fn selected_home_match(&self) -> Option<&'static Match> {
        home_rows().get(self.state.selected).copied()
    }

    fn request_commentary(&mut self) {
        if self.state.tab != Tab::Home {
            return;
        }
        let Some(m) = self.selected_home_match() else {
            self.state.push_log("[INFO] No match selected for commentary");
            return;
        };
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Commentary unavailable");
            return;
        };
        let seq = self.state.begin_commentary(m.id);
        let request = CommentaryRequest {
            match_id: m.id,
            seq,
            kind: commentary_kind(m),
            context: MatchContext::from_match(m),
        };
        if tx
            .send(state::ProviderCommand::FetchCommentary(request))
            .is_err()
        {
            self.state.commentary_loading.remove(&m.id);
            self.state.push_log("[WARN] Commentary request failed");
        }
    }

    fn open_editor(&mut self) {
        if self.state.tab != Tab::Home {
            return;
        }
        let Some(m) = self.selected_home_match() else {
            return;
        };
        if !self.state.can_predict(m) {
            self.state
                .push_log("[INFO] Predictions need a login and a scheduled match with known teams");
            return;
        }
        self.state.open_prediction_editor(m);
    }
}

/// Home rows in render order, relative to the viewer's local calendar day.
fn home_rows() -> Vec<&'static Match> {
    state::home_rows(&data::MATCHES, Local::now().date_naive())
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    commentary::spawn_commentary_provider(tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.tick();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    if !app.gate_open {
        render_countdown(frame, frame.size(), &app.time_left);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.tab {
        Tab::Home => render_home(frame, chunks[1], &app.state),
        Tab::Groups => render_groups(frame, chunks[1]),
        Tab::Stadiums => render_stadiums(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.login_open {
        render_login_modal(frame, frame.size(), &app.state);
    }
    if let Some(editor) = &app.state.editor {
        render_editor_modal(frame, frame.size(), editor);
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let tabs = [Tab::Home, Tab::Groups, Tab::Stadiums]
        .iter()
        .map(|tab| {
            if *tab == state.tab {
                format!("[{}]", tab_label(*tab))
            } else {
                format!(" {} ", tab_label(*tab))
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let session = match &state.session {
        Some(s) => format!("user: {}", s.username),
        None => "not logged in".to_string(),
    };
    format!("WC26 COMPANION | {tabs} | {session}")
}

fn footer_text(state: &AppState) -> &'static str {
    if state.login_open {
        "Type name | Enter Login | Esc Cancel"
    } else if state.editor.is_some() {
        "↑/+ Inc | ↓/- Dec | Tab Switch side | Enter Save | Esc Cancel"
    } else {
        match state.tab {
            Tab::Home => {
                "1/2/3 Tabs | j/k Move | g Commentary | p Predict | l Login | o Logout | ? Help | q Quit"
            }
            Tab::Groups => "1/2/3 Tabs | l Login | o Logout | ? Help | q Quit",
            Tab::Stadiums => "1/2/3 Tabs | j/k Scroll | l Login | o Logout | ? Help | q Quit",
        }
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let recent: Vec<String> = state.logs.iter().rev().take(3).cloned().collect();
    recent.into_iter().rev().collect::<Vec<_>>().join("\n")
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Home => "Home",
        Tab::Groups => "Groups",
        Tab::Stadiums => "Stadiums",
    }
}

fn status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Scheduled => "Scheduled",
        MatchStatus::InProgress => "Live",
        MatchStatus::Finished => "Finished",
    }
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let today = Local::now().date_naive();
    let todays = state::todays_matches(&data::MATCHES, today);
    let yesterdays = state::yesterdays_highlights(&data::MATCHES, today);
    let upcoming = state::upcoming_fixtures(&data::MATCHES, today);

    let mut constraints = Vec::new();
    if !todays.is_empty() {
        constraints.push(Constraint::Length(section_height(todays.len())));
    }
    if !yesterdays.is_empty() {
        constraints.push(Constraint::Length(section_height(yesterdays.len())));
    }
    constraints.push(Constraint::Min(4));
    constraints.push(Constraint::Length(8));
    constraints.push(Constraint::Length(5));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut chunk = 0;
    let mut offset = 0;
    if !todays.is_empty() {
        render_match_section(frame, chunks[chunk], "Today's Matches", &todays, state, offset);
        offset += todays.len();
        chunk += 1;
    }
    if !yesterdays.is_empty() {
        render_match_section(
            frame,
            chunks[chunk],
            "Yesterday's Highlights",
            &yesterdays,
            state,
            offset,
        );
        offset += yesterdays.len();
        chunk += 1;
    }
    render_match_section(
        frame,
        chunks[chunk],
        "Upcoming Fixtures",
        &upcoming,
        state,
        offset,
    );
    chunk += 1;

    let selected = home_rows().get(state.selected).copied();
    render_card_detail(frame, chunks[chunk], state, selected);
    chunk += 1;

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[chunk]);
}

fn section_height(rows: usize) -> u16 {
    rows.min(6) as u16 + 2
}

fn render_match_section(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    matches: &[&Match],
    state: &AppState,
    offset: usize,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if matches.is_empty() {
        let empty = Paragraph::new("No matches scheduled.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let selected_local = state
        .selected
        .checked_sub(offset)
        .filter(|idx| *idx < matches.len());
    let visible = inner.height as usize;
    let (start, end) = visible_range(selected_local.unwrap_or(0), matches.len(), visible);

    for (row, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        let style = if selected_local == Some(idx) {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(match_row_text(matches[idx], state)).style(style);
        frame.render_widget(paragraph, row_area);
    }
}

fn match_row_text(m: &Match, state: &AppState) -> String {
    let score = match (m.score_a, m.score_b) {
        (Some(a), Some(b)) => format!("{a}-{b}"),
        _ => "vs".to_string(),
    };
    let prediction = state
        .session
        .as_ref()
        .and_then(|_| state.prediction_for(m.id))
        .map(|p| format!("  [your pick {}-{}]", p.score_a, p.score_b))
        .unwrap_or_default();
    format!(
        "#{:>3} {} {} {}  {}  {} · {}{}",
        m.id,
        team_cell(&m.team_a),
        score,
        team_cell(&m.team_b),
        m.date.with_timezone(&Local).format("%a %b %-d"),
        m.stadium,
        m.city,
        prediction
    )
}

fn team_cell(team: &Team) -> String {
    // No flag for the placeholder, just the sentinel name.
    if team.is_placeholder() {
        team.name.clone()
    } else {
        format!("{} {}", data::flag_emoji(&team.code), team.name)
    }
}

fn render_card_detail(frame: &mut Frame, area: Rect, state: &AppState, m: Option<&Match>) {
    let block = Block::default().title("Match Card").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(m) = m else {
        frame.render_widget(Paragraph::new("No match selected"), inner);
        return;
    };

    let score = match (m.score_a, m.score_b) {
        (Some(a), Some(b)) => format!("{a} - {b}"),
        _ => "vs".to_string(),
    };
    let mut lines = vec![
        format!(
            "{} {} {}  [{}]",
            team_cell(&m.team_a),
            score,
            team_cell(&m.team_b),
            status_label(m.status)
        ),
        format!(
            "{} · {} · {}, {}",
            m.date.with_timezone(&Local).format("%A, %B %-d, %Y"),
            m.stadium,
            m.city,
            m.country
        ),
    ];
    if state.session.is_some() {
        if let Some(p) = state.prediction_for(m.id) {
            lines.push(format!("Your prediction: {} - {}", p.score_a, p.score_b));
        }
    }
    if state.commentary_loading.contains(&m.id) {
        lines.push("Generating commentary...".to_string());
    } else if let Some(text) = state.commentary.get(&m.id) {
        lines.push(text.clone());
    } else {
        lines.push(format!("g {}", commentary_label(m)));
    }

    let paragraph = Paragraph::new(lines.join("\n")).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn commentary_label(m: &Match) -> &'static str {
    match commentary_kind(m) {
        CommentaryKind::Highlight => "Highlights",
        CommentaryKind::Venue => "Venue Info",
        CommentaryKind::Preview => "Preview",
    }
}

fn render_groups(frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);
        for (c, col_area) in cols.iter().enumerate() {
            let Some(group) = data::GROUPS.get(r * 4 + c) else {
                continue;
            };
            let block = Block::default()
                .title(group.name.clone())
                .borders(Borders::ALL);
            let inner = block.inner(*col_area);
            frame.render_widget(block, *col_area);
            let text = group
                .teams
                .iter()
                .map(|t| t.name.clone())
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(Paragraph::new(text), inner);
        }
    }
}

fn render_stadiums(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Host Stadiums").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let visible = inner.height as usize;
    let total = data::STADIUMS.len();
    let max_start = total.saturating_sub(visible);
    let start = (state.stadiums_scroll as usize).min(max_start);
    let end = (start + visible).min(total);

    for (row, idx) in (start..end).enumerate() {
        let s = &data::STADIUMS[idx];
        let row_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        let line = format!(
            "{:<24} {} {}, {}  ·  Capacity {:>7}",
            s.name,
            data::flag_emoji(&data::country_flag_code(&s.country)),
            s.city,
            s.country,
            format_capacity(s.capacity)
        );
        frame.render_widget(Paragraph::new(line), row_area);
    }
}

fn format_capacity(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn render_countdown(frame: &mut Frame, area: Rect, left: &TimeLeft) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new("FIFA World Cup 2026")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    let subtitle = Paragraph::new(
        "The Final Draw takes place in Washington DC on December 5, 2025.\nThe countdown has begun!",
    )
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[2]);

    let timer = if left.is_zero() {
        "The draw is happening!".to_string()
    } else {
        format!(
            "{:02} : {:02} : {:02} : {:02}\nDays   Hours  Mins   Secs",
            left.days, left.hours, left.minutes, left.seconds
        )
    };
    let timer = Paragraph::new(timer)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center);
    frame.render_widget(timer, chunks[3]);
}

fn render_login_modal(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(40, 20, area);
    frame.render_widget(Clear, popup_area);

    let text = format!(
        "Enter your username:\n> {}_\n\nEnter Login | Esc Cancel",
        state.login_input
    );
    let login = Paragraph::new(text)
        .block(Block::default().title("Login").borders(Borders::ALL));
    frame.render_widget(login, popup_area);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &PredictionEditor) {
    let popup_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup_area);

    let m = data::MATCHES.iter().find(|m| m.id == editor.match_id);
    let (name_a, name_b) = match m {
        Some(m) => (team_cell(&m.team_a), team_cell(&m.team_b)),
        None => ("Team A".to_string(), "Team B".to_string()),
    };
    let marker = |focused: bool| if focused { ">" } else { " " };
    let text = format!(
        "Predict the final score\n\n{} {}: {}\n{} {}: {}\n\n↑/↓ Adjust | Tab Switch | Enter Save | Esc Cancel",
        marker(editor.focus == EditorFocus::TeamA),
        name_a,
        editor.score_a,
        marker(editor.focus == EditorFocus::TeamB),
        name_b,
        editor.score_b
    );
    let prediction = Paragraph::new(text)
        .block(Block::default().title("Prediction").borders(Borders::ALL));
    frame.render_widget(prediction, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "WC26 Companion - Help",
        "",
        "Global:",
        "  1 / 2 / 3    Home / Groups / Stadiums",
        "  l            Login",
        "  o            Logout (clears predictions)",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Home:",
        "  j/k or ↑/↓   Move selection",
        "  g            Generate commentary for the card",
        "  p / Enter    Predict score (login required)",
        "",
        "Stadiums:",
        "  j/k or ↑/↓   Scroll",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
