use thiserror::Error;

/// Failures while requesting or consuming a streaming completion.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The provider reported an error inside an already-open stream.
    #[error("stream error: {0}")]
    Stream(String),

    #[error("malformed stream chunk: {0}")]
    Decode(#[from] serde_json::Error),
}
