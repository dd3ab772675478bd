use crate::codec;
use crate::config::ClientConfig;
use crate::connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
use crate::instrument::SharedInstrument;
use crate::poller::{poll_task, PollContext};
use crate::traits::*;
use futures::stream::{SplitSink, SplitStream};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsWriter = SplitSink<WsStream, Message>;
pub(crate) type WsReader = SplitStream<WsStream>;

/// Client metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub requests_sent: u64,
    pub snapshots_received: u64,
    pub rpc_errors: u64,
    pub decode_errors: u64,
    pub connection_state: ConnectionState,
}

/// Polling market-data session against the Deribit JSON-RPC endpoint
///
/// Opening a client spawns two tokio tasks on the current runtime:
/// - a read pump that decodes responses and publishes snapshots to the sink
/// - a poll pump that sends `public/get_order_book` once per interval
///
/// Neither task talks to the render thread except through the sink and the
/// shared instrument, so every method here is synchronous and non-blocking
/// apart from [`closed`](Self::closed).
pub struct MarketDataClient {
    config: ClientConfig,
    instrument: SharedInstrument,
    sink: Arc<dyn SnapshotSink>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl MarketDataClient {
    /// Connect to the default endpoint and start polling `instrument`
    pub async fn open(instrument: impl AsRef<str>, sink: Arc<dyn SnapshotSink>) -> Result<Self> {
        Self::connect(ClientConfig::default(), instrument.as_ref(), sink).await
    }

    /// Connect with an explicit configuration.
    ///
    /// Called by the builder's `open()`; use `deribit::builder()` for a custom endpoint.
    pub(crate) async fn connect(
        config: ClientConfig,
        instrument: &str,
        sink: Arc<dyn SnapshotSink>,
    ) -> Result<Self> {
        let state = Arc::new(AtomicConnectionState::new(ConnectionState::Connecting));
        let metrics = Arc::new(AtomicMetrics::new());
        let instrument = SharedInstrument::new(instrument);

        debug!("Connecting to {}", config.url);
        let (ws_stream, _) = connect_async(config.url.as_str())
            .await
            .map_err(|e| DeribitError::Connect(format!("{}: {}", config.url, e)))?;

        info!("Connected to {}", config.url);
        state.set(ConnectionState::Connected);

        let (write, read) = ws_stream.split();
        let (shutdown_tx, _) = watch::channel(false);

        let read_handle = {
            let sink = Arc::clone(&sink);
            let instrument = instrument.clone();
            let state = Arc::clone(&state);
            let metrics = Arc::clone(&metrics);
            let shutdown_rx = shutdown_tx.subscribe();

            tokio::spawn(async move {
                read_task(read, sink, instrument, state, metrics, shutdown_rx).await;
            })
        };

        let poll_handle = {
            let ctx = PollContext {
                instrument: instrument.clone(),
                next_id: Arc::new(AtomicU64::new(1)),
                state: Arc::clone(&state),
                metrics: Arc::clone(&metrics),
            };
            let interval = config.poll_interval;
            let shutdown_rx = shutdown_tx.subscribe();

            tokio::spawn(async move {
                poll_task(interval, write, ctx, shutdown_rx).await;
            })
        };

        Ok(Self {
            config,
            instrument,
            sink,
            state,
            metrics,
            shutdown_tx,
            tasks: Mutex::new(vec![read_handle, poll_handle]),
        })
    }

    /// Switch the polled instrument.
    ///
    /// The next poll uses the new name. The sink is cleared so the UI shows
    /// its placeholder instead of the previous instrument's book; responses
    /// to requests already in flight for the old name are dropped on arrival.
    pub fn set_instrument(&self, name: impl AsRef<str>) {
        let name = name.as_ref();
        let previous = self.instrument.store(name);
        info!("Switching instrument {} -> {}", previous, name);
        self.sink.clear();
    }

    /// Instrument that the next poll will request
    pub fn instrument(&self) -> Arc<str> {
        self.instrument.load()
    }

    /// Stop both pumps and release the socket. Safe to call more than once.
    pub fn close(&self) {
        let first = self.shutdown_tx.send_if_modified(|stopped| {
            if *stopped {
                false
            } else {
                *stopped = true;
                true
            }
        });

        if first {
            self.state.close();
            info!("Closing market-data session");
        }
    }

    /// Wait until both pumps have exited
    pub async fn closed(&self) {
        let handles = std::mem::take(&mut *self.tasks.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Market-data task ended abnormally: {}", e);
            }
        }
    }

    #[inline]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            requests_sent: self.metrics.requests_sent(),
            snapshots_received: self.metrics.snapshots_received(),
            rpc_errors: self.metrics.rpc_errors(),
            decode_errors: self.metrics.decode_errors(),
            connection_state: self.state.get(),
        }
    }
}

impl Drop for MarketDataClient {
    fn drop(&mut self) {
        self.close();
    }
}

/// Read pump: decode every text frame and publish snapshots until the
/// transport fails, the server closes, or shutdown is signalled.
async fn read_task(
    mut read: WsReader,
    sink: Arc<dyn SnapshotSink>,
    instrument: SharedInstrument,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            debug!("Read task observed shutdown flag");
            break;
        }

        let message = tokio::select! {
            msg = read.next() => msg,
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Read task received shutdown signal");
                    break;
                }
                continue;
            }
        };

        match message {
            Some(Ok(Message::Text(text))) => {
                handle_frame(&text, &instrument.load(), sink.as_ref(), &metrics)
            }
            Some(Ok(Message::Close(frame))) => {
                warn!("Server closed the session: {:?}", frame);
                break;
            }
            Some(Ok(_)) => {
                // Ping, pong and binary frames carry nothing for us
            }
            Some(Err(e)) => {
                error!("WebSocket read failed: {}", DeribitError::from(e));
                break;
            }
            None => {
                warn!("WebSocket stream ended");
                break;
            }
        }
    }

    if state.close() != ConnectionState::Closed {
        warn!("Market-data session closed; showing last snapshot");
    }
    debug!("Read task exiting");
}

/// Decode one text frame. Snapshots for an instrument other than `current`
/// answer a request sent before the last switch and are dropped.
fn handle_frame(text: &str, current: &str, sink: &dyn SnapshotSink, metrics: &AtomicMetrics) {
    match codec::decode_frame(text) {
        Ok(Some(snapshot))
            if !snapshot.instrument_name.is_empty() && snapshot.instrument_name != current =>
        {
            debug!(
                instrument = %snapshot.instrument_name,
                current,
                "Dropping snapshot for previous instrument"
            );
        }
        Ok(Some(snapshot)) => {
            metrics.increment_snapshots();
            debug!(
                instrument = %snapshot.instrument_name,
                change_id = snapshot.change_id,
                "Order book snapshot received"
            );
            sink.publish(snapshot);
        }
        Ok(None) => {
            debug!("Frame carried neither result nor error, skipping");
        }
        Err(DeribitError::Rpc { code, message }) => {
            metrics.increment_rpc_errors();
            warn!(code, message = %message, "Deribit API error");
        }
        Err(e) => {
            metrics.increment_decode_errors();
            warn!("Failed to decode frame: {}", e);
        }
    }
}
