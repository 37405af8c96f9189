use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Text published to `FetchState::error_message`.
    pub fn display_message(&self) -> String {
        match self {
            FetchError::HttpStatus { url, .. } => format!("Failed to fetch data from {}", url),
            other => format!("Failed to fetch data from remote URL {}", other),
        }
    }
}
