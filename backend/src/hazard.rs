use std::time::Duration;

use serde::Deserialize;
use shared::{RoutePoint, Severity};

use crate::error::HazardError;

pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Keys we treat as "not configured". Checked-in sample configs tend to
/// ship one of these.
const PLACEHOLDER_KEYS: &[&str] = &["YOUR_API_KEY", "YOUR_API_KEY_HERE", "changeme"];

/// Client for the generative hazard backend. Strictly best-effort: one
/// attempt per route query, bounded by `REQUEST_TIMEOUT`, no retries.
#[derive(Debug, Clone)]
pub struct HazardClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// One route as described by the backend, before conversion into the
/// shared `Route` shape. Distances in meters, durations in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardRouteSpec {
    pub name: String,
    pub distance: f64,
    pub duration: f64,
    pub safety_score: f64,
    #[serde(default)]
    pub hazards: Vec<HazardSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HazardSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub location: Option<HazardLocation>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HazardLocation {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct HazardPayload {
    routes: Vec<HazardRouteSpec>,
}

impl HazardClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, HazardError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from `HAZARD_API_KEY`/`HAZARD_API_URL`. Returns
    /// `None` when the key is absent or a placeholder, which disables
    /// the external backend entirely.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("HAZARD_API_KEY").ok()?;
        if is_placeholder(&key) {
            return None;
        }
        let url =
            std::env::var("HAZARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        match Self::new(url, key) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!("could not build hazard client: {err}");
                None
            }
        }
    }

    /// Ask the backend for candidate route descriptions between the two
    /// endpoints. Any transport or parse problem is an error; the engine
    /// degrades to deterministic generation on it.
    pub async fn fetch_routes(
        &self,
        start: &RoutePoint,
        end: &RoutePoint,
    ) -> Result<Vec<HazardRouteSpec>, HazardError> {
        let prompt = build_prompt(start, end);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let reply = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        decode_reply(&reply)
    }
}

fn is_placeholder(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || PLACEHOLDER_KEYS.contains(&key)
}

fn describe_endpoint(point: &RoutePoint) -> String {
    match &point.name {
        Some(name) => format!("{name} ({:.4}, {:.4})", point.lat, point.lon),
        None => format!("({:.4}, {:.4})", point.lat, point.lon),
    }
}

fn build_prompt(start: &RoutePoint, end: &RoutePoint) -> String {
    format!(
        "You are a flood-safety route assistant for Bangladesh. Describe exactly 3 \
         road routes from {} to {}, ordered from safest to shortest. Reply with a \
         single JSON object of the form {{\"routes\": [{{\"name\": string, \
         \"distance\": meters, \"duration\": seconds, \"safetyScore\": 0-100, \
         \"hazards\": [{{\"type\": string, \"description\": string, \"severity\": \
         \"info\"|\"warning\"|\"danger\", \"location\": {{\"lat\": number, \"lon\": \
         number}}}}]}}]}} and nothing else.",
        describe_endpoint(start),
        describe_endpoint(end),
    )
}

fn decode_reply(body: &str) -> Result<Vec<HazardRouteSpec>, HazardError> {
    let reply: GenerateReply = serde_json::from_str(body)?;
    let text = reply
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.as_str())
        .ok_or(HazardError::EmptyReply)?;

    let payload: HazardPayload = serde_json::from_str(strip_code_fences(text))?;
    if payload.routes.is_empty() {
        return Err(HazardError::NoRoutes);
    }
    Ok(payload.routes)
}

/// Models wrap JSON answers in markdown fences even when asked not to.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
