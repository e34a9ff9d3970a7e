use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote API error: {message}")]
    Api { message: String },

    #[error("Failed to decode remote response: {0}")]
    Decode(#[from] serde_json::Error),
}
