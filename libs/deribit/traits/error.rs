use thiserror::Error;

/// Main error type for the market-data client
#[derive(Error, Debug)]
pub enum DeribitError {
    /// Initial websocket handshake failed
    #[error("Connect error: {0}")]
    Connect(String),

    /// Read or write on an established session failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame was not a valid response envelope
    #[error("Decode error: {0}")]
    Decode(String),

    /// The exchange answered with an error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for DeribitError {
    fn from(e: serde_json::Error) -> Self {
        DeribitError::Decode(e.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for DeribitError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        DeribitError::Transport(e.to_string())
    }
}

/// Result type for market-data operations
pub type Result<T> = std::result::Result<T, DeribitError>;
