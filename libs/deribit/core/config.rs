use std::time::Duration;

/// Public Deribit JSON-RPC websocket endpoint
pub const DEFAULT_ENDPOINT: &str = "wss://www.deribit.com/ws/api/v2";

/// Cadence of `public/get_order_book` polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Session configuration, produced by the builder
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) url: String,
    pub(crate) poll_interval: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            url: url.into(),
            poll_interval,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL)
    }
}
