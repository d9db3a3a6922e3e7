use thiserror::Error;

/// Errors surfaced by the daily-wisdom core.
#[derive(Error, Debug)]
pub enum WisdomError {
    #[error("No items available")]
    NoItems,

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Invalid notification time: {0}")]
    InvalidTime(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response for {path}: status {status}")]
    BadStatus { path: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for daily-wisdom operations.
pub type Result<T> = std::result::Result<T, WisdomError>;

impl WisdomError {
    /// Whether the network could not be reached at all. A server that
    /// answered with an error status does not count.
    pub fn is_network(&self) -> bool {
        matches!(self, WisdomError::Network(_) | WisdomError::ResourceUnavailable(_))
    }
}
