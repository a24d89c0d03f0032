use thiserror::Error;

/// Failure modes of the optional generative hazard backend. These are
/// logged and swallowed inside the engine; they never reach a caller of
/// `find_safe_routes`.
#[derive(Debug, Error)]
pub enum HazardError {
    #[error("hazard backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("hazard backend reply was not the expected JSON shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("hazard backend reply contained no generated text")]
    EmptyReply,
    #[error("hazard backend returned an empty route list")]
    NoRoutes,
}
