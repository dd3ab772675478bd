//! Poll pump for the market-data session
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Poll Task          │
//! │  (Tokio spawn)      │
//! │                     │
//! │  Every interval:    │
//! │  1. Wait for tick   │
//! │  2. Load instrument │
//! │  3. Next request id │
//! │  4. Send request ───┼──> WebSocket write half ──> Deribit
//! └─────────────────────┘
//! ```
//!
//! The task owns the write half of the socket outright; the read pump never
//! writes, so no lock sits on the send path. The instrument is re-read on every
//! tick, which is what makes `set_instrument` take effect on the next poll.

use crate::client::WsWriter;
use crate::codec;
use crate::connection_state::{AtomicConnectionState, AtomicMetrics};
use crate::instrument::SharedInstrument;
use crate::traits::DeribitError;
use futures::SinkExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, warn};

/// Everything the poll task reads on each tick
pub(crate) struct PollContext {
    pub instrument: SharedInstrument,
    pub next_id: Arc<AtomicU64>,
    pub state: Arc<AtomicConnectionState>,
    pub metrics: Arc<AtomicMetrics>,
}

/// Poll task that sends `public/get_order_book` at a fixed cadence
///
/// The task will:
/// 1. Wait for the first interval (skips immediate first tick)
/// 2. On each tick, send one request for the current instrument
/// 3. Continue until shutdown is signalled or the session is closed
///
/// A failed send is logged. The task only gives up on a failed send once the
/// read pump has marked the session closed.
pub(crate) async fn poll_task(
    interval: Duration,
    mut write: WsWriter,
    ctx: PollContext,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    // Skip the first immediate tick - wait for the first interval
    ticker.tick().await;
    // A stalled send should not be followed by a burst of catch-up polls
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    debug!("Poll task started with interval: {:?}", interval);

    loop {
        if *shutdown_rx.borrow() {
            debug!("Poll task observed shutdown flag");
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Poll task received shutdown signal");
                    break;
                }
                continue;
            }
        }

        if ctx.state.is_closed() {
            warn!("Session closed, poll task exiting");
            break;
        }

        let id = ctx.next_id.fetch_add(1, Ordering::Relaxed);
        let instrument = ctx.instrument.load();

        let text = match codec::encode_request(id, &instrument) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to encode request {}: {}", id, e);
                continue;
            }
        };

        match write.send(Message::Text(text)).await {
            Ok(()) => {
                ctx.metrics.increment_sent();
                debug!(id, instrument = %instrument, "Order book request sent");
            }
            Err(e) => {
                error!("Failed to send request {}: {}", id, DeribitError::from(e));
                if ctx.state.is_closed() {
                    warn!("Session closed, poll task exiting");
                    break;
                }
            }
        }
    }

    let _ = write.close().await;
    debug!("Poll task exiting");
}
