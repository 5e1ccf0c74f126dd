use thiserror::Error;

/// Why a snapshot could not be obtained. Every variant takes the same recovery
/// path; the split exists for logs and for callers that want to tell them apart.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("snapshot payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),
}

impl LoadError {
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Transport { .. } => "transport",
            LoadError::Status { .. } => "status",
            LoadError::Decode(_) => "decode",
            LoadError::Unavailable(_) => "unavailable",
        }
    }
}
