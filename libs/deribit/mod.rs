//! # Deribit
//!
//! Market-data client for the Deribit JSON-RPC websocket API.
//!
//! ## Features
//!
//! - **Polling session**: one long-lived websocket, a 1 Hz `public/get_order_book` poll
//! - **Type-state builder**: the endpoint must be set before a session can be opened
//! - **Lock-light publication**: snapshots are handed to a [`SnapshotSink`] as immutable values
//! - **Hot instrument switch**: the polled instrument is swapped without restarting the session
//!
//! ```rust,ignore
//! let client = deribit::builder()
//!     .url("wss://www.deribit.com/ws/api/v2")
//!     .poll_interval(Duration::from_secs(1))
//!     .open("BTC-PERPETUAL", sink)
//!     .await?;
//!
//! client.set_instrument("ETH-PERPETUAL");
//! client.close();
//! ```

pub mod catalogue;
pub mod core;
pub mod models;
pub mod traits;

pub use traits::*;

pub use self::core::{
    builder, client, codec, config, connection_state, instrument, poller,
    builder::{states, MarketDataClientBuilder},
    client::{MarketDataClient, Metrics},
    config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL},
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState},
    instrument::SharedInstrument,
};

pub use models::{
    Direction, Level, OrderBookSnapshot, OrderBookStats, RpcErrorBody, RpcRequest, RpcResponse,
    Trade,
};

pub use catalogue::{display_symbol, orderbook_title, INSTRUMENTS};

/// Type alias for Result with DeribitError
pub type Result<T> = std::result::Result<T, traits::DeribitError>;
