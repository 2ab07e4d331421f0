use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::state::{Delta, Match, MatchStatus, ProviderCommand};

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

pub const FALLBACK_NO_KEY: &str = "Gemini API key not configured.";
pub const FALLBACK_HIGHLIGHT: &str = "Could not generate highlight. Please try again later.";
pub const FALLBACK_PREVIEW: &str = "Could not generate preview. Please try again later.";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryKind {
    Highlight,
    Preview,
    Venue,
}

/// Finished matches get a highlight, undrawn fixtures a venue piece, anything
/// else a pre-match preview.
pub fn commentary_kind(m: &Match) -> CommentaryKind {
    if m.status == MatchStatus::Finished {
        CommentaryKind::Highlight
    } else if m.team_a.is_placeholder() {
        CommentaryKind::Venue
    } else {
        CommentaryKind::Preview
    }
}

pub fn fallback_text(kind: CommentaryKind) -> &'static str {
    match kind {
        CommentaryKind::Highlight => FALLBACK_HIGHLIGHT,
        CommentaryKind::Preview | CommentaryKind::Venue => FALLBACK_PREVIEW,
    }
}

/// Snapshot of the card a request was made for, so the worker never touches
/// app state.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub team_a: String,
    pub team_b: String,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub stadium: String,
    pub city: String,
}

impl MatchContext {
    pub fn from_match(m: &Match) -> Self {
        Self {
            team_a: m.team_a.name.clone(),
            team_b: m.team_b.name.clone(),
            score_a: m.score_a,
            score_b: m.score_b,
            stadium: m.stadium.clone(),
            city: m.city.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentaryRequest {
    pub match_id: u32,
    pub seq: u64,
    pub kind: CommentaryKind,
    pub context: MatchContext,
}

#[derive(Debug, Clone)]
pub struct CommentaryConfig {
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl CommentaryConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let timeout_secs = env::var("COMMENTARY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(5, 120);
        Self {
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

pub fn build_prompt(kind: CommentaryKind, ctx: &MatchContext) -> String {
    match kind {
        CommentaryKind::Highlight => format!(
            "Generate a fictional, exciting, short (2-3 sentences) match highlight for a \
             FIFA World Cup game between {} and {}. The final score was {} {} - {} {}.",
            ctx.team_a,
            ctx.team_b,
            ctx.team_a,
            fmt_score(ctx.score_a),
            fmt_score(ctx.score_b),
            ctx.team_b
        ),
        CommentaryKind::Preview => format!(
            "Generate a fictional, insightful, short (2-3 sentences) statistical preview \
             for an upcoming FIFA World Cup match between {} and {}. Mention a key player \
             or team strength for each.",
            ctx.team_a, ctx.team_b
        ),
        CommentaryKind::Venue => format!(
            "Generate an exciting, short (2-3 sentences) preview of a FIFA World Cup match \
             being held at {} in {}. Focus on the atmosphere and significance of the \
             city/stadium for a major football match. The teams are not yet known.",
            ctx.stadium, ctx.city
        ),
    }
}

fn fmt_score(score: Option<u32>) -> String {
    score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

/// A missing credential is not an error: the fixed fallback comes back without
/// touching the network.
pub fn resolve_commentary(cfg: &CommentaryConfig, request: &CommentaryRequest) -> Result<String> {
    let Some(api_key) = cfg.api_key.as_deref() else {
        return Ok(FALLBACK_NO_KEY.to_string());
    };
    let prompt = build_prompt(request.kind, &request.context);
    generate_text(cfg, api_key, &prompt)
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

fn generate_text(cfg: &CommentaryConfig, api_key: &str, prompt: &str) -> Result<String> {
    let client = http_client()?;
    let body = GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
    };

    let response = client
        .post(GEMINI_URL)
        .header("x-goog-api-key", api_key)
        .timeout(cfg.timeout)
        .json(&body)
        .send()
        .context("commentary request failed")?
        .error_for_status()
        .context("commentary request rejected")?;

    let raw = response.text().context("commentary response unreadable")?;
    parse_generate_text(&raw)
}

/// Pulls the first candidate's text out of a generateContent reply.
pub fn parse_generate_text(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        anyhow::bail!("commentary response was empty");
    }
    let parsed: GenerateResponse =
        serde_json::from_str(trimmed).context("invalid commentary json")?;
    let text = parsed
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim().to_string();
    if text.is_empty() {
        anyhow::bail!("commentary response had no text");
    }
    Ok(text)
}

/// Worker thread: takes commentary commands, answers with deltas. Failures
/// degrade to the fixed fallback for the request's variant; the UI decides
/// whether a reply is still current via its sequence number.
pub fn spawn_commentary_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let cfg = CommentaryConfig::from_env();
        if cfg.api_key.is_none() {
            let _ = tx.send(Delta::Log(
                "[WARN] GEMINI_API_KEY not set; commentary uses fallback text".to_string(),
            ));
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchCommentary(request) => {
                    let text = match resolve_commentary(&cfg, &request) {
                        Ok(text) => text,
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Commentary error: {err}")));
                            fallback_text(request.kind).to_string()
                        }
                    };
                    let _ = tx.send(Delta::SetCommentary {
                        match_id: request.match_id,
                        seq: request.seq,
                        text,
                    });
                }
            }
        }
    });
}
