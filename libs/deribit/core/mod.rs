//! Session machinery: builder, configuration, shared state and the two pumps.

pub mod builder;
pub mod client;
pub mod codec;
pub mod config;
pub mod connection_state;
pub mod instrument;
pub mod poller;

pub use builder::{states, MarketDataClientBuilder};
pub use client::{MarketDataClient, Metrics};
pub use config::ClientConfig;
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
pub use instrument::SharedInstrument;

/// Create a new market-data client builder
///
/// # Example
/// ```ignore
/// let client = deribit::builder()
///     .url("wss://test.deribit.com/ws/api/v2")
///     .poll_interval(Duration::from_millis(500))
///     .open("BTC-PERPETUAL", sink)
///     .await?;
/// ```
pub fn builder() -> MarketDataClientBuilder<builder::states::NoUrl> {
    MarketDataClientBuilder::new()
}
