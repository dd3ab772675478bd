pub mod states;

use crate::client::MarketDataClient;
use crate::config::{ClientConfig, DEFAULT_POLL_INTERVAL};
use crate::traits::*;
use states::*;
use std::sync::Arc;
use std::time::Duration;

/// Type-state builder for [`MarketDataClient`]
///
/// The endpoint URL is required; the poll interval defaults to one second.
pub struct MarketDataClientBuilder<U>
where
    U: UrlState,
{
    _state: TypeState<U>,
    url: Option<String>,
    poll_interval: Duration,
}

impl MarketDataClientBuilder<NoUrl> {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            _state: TypeState::new(),
            url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn url(self, url: impl Into<String>) -> MarketDataClientBuilder<HasUrl> {
        MarketDataClientBuilder {
            _state: TypeState::new(),
            url: Some(url.into()),
            poll_interval: self.poll_interval,
        }
    }
}

impl Default for MarketDataClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> MarketDataClientBuilder<U>
where
    U: UrlState,
{
    /// Time between two `public/get_order_book` requests
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl MarketDataClientBuilder<HasUrl> {
    /// Validate and produce the session configuration without connecting
    pub fn build_config(self) -> Result<ClientConfig> {
        let url = self
            .url
            .ok_or_else(|| DeribitError::Configuration("endpoint URL is required".into()))?;

        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(DeribitError::Configuration(format!(
                "endpoint must be a ws:// or wss:// URL, got {}",
                url
            )));
        }

        if self.poll_interval.is_zero() {
            return Err(DeribitError::Configuration(
                "poll interval must be greater than zero".into(),
            ));
        }

        Ok(ClientConfig::new(url, self.poll_interval))
    }

    /// Connect and start polling `instrument`, publishing snapshots into `sink`
    pub async fn open(
        self,
        instrument: impl AsRef<str>,
        sink: Arc<dyn SnapshotSink>,
    ) -> Result<MarketDataClient> {
        let config = self.build_config()?;
        MarketDataClient::connect(config, instrument.as_ref(), sink).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarketDataClientBuilder::new()
            .url("wss://www.deribit.com/ws/api/v2")
            .build_config()
            .unwrap();

        assert_eq!(config.url(), "wss://www.deribit.com/ws/api/v2");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_poll_interval_before_and_after_url() {
        let config = MarketDataClientBuilder::new()
            .poll_interval(Duration::from_millis(250))
            .url("ws://127.0.0.1:9000")
            .build_config()
            .unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_non_websocket_url() {
        let err = MarketDataClientBuilder::new()
            .url("https://www.deribit.com")
            .build_config()
            .unwrap_err();
        assert!(matches!(err, DeribitError::Configuration(_)));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = MarketDataClientBuilder::new()
            .url("wss://www.deribit.com/ws/api/v2")
            .poll_interval(Duration::ZERO)
            .build_config()
            .unwrap_err();
        assert!(matches!(err, DeribitError::Configuration(_)));
    }
}
