//! Integration tests for the market-data session
//!
//! Each test runs the real client against a scripted websocket peer.

#[macro_use]
mod common;

use common::{sample_snapshot, MockDeribitServer, RecordingSink, Reply};
use deribit::{ConnectionState, DeribitError, Level, SnapshotSink};
use std::sync::Arc;
use std::time::Duration;

const FAST_POLL: Duration = Duration::from_millis(50);

async fn open_fast(
    server: &MockDeribitServer,
    sink: Arc<RecordingSink>,
) -> deribit::MarketDataClient {
    deribit::builder()
        .url(server.ws_url())
        .poll_interval(FAST_POLL)
        .open("BTC-PERPETUAL", sink as Arc<dyn SnapshotSink>)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_happy_path_publishes_snapshot() {
    verbose_println!("Testing happy path at the default 1s cadence...");

    let server = MockDeribitServer::start(Reply::Snapshot(sample_snapshot("BTC-PERPETUAL"))).await;
    let sink = RecordingSink::new();

    let client = deribit::builder()
        .url(server.ws_url())
        .open("BTC-PERPETUAL", sink.clone() as Arc<dyn SnapshotSink>)
        .await
        .unwrap();
    assert_eq!(client.connection_state(), ConnectionState::Connected);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let snapshot = sink.latest().expect("snapshot after 1.5s");
    verbose_println!("  Received {} snapshot(s)", sink.published().len());

    assert_eq!(snapshot.instrument_name, "BTC-PERPETUAL");
    assert_eq!(snapshot.asks, vec![Level::new(100.0, 1.0), Level::new(101.0, 2.0)]);
    assert_eq!(snapshot.bids, vec![Level::new(99.0, 3.0), Level::new(98.0, 4.0)]);
    assert_eq!(snapshot.settlement_price, 0.0);

    let (spread, pct) = snapshot.spread().unwrap();
    assert_eq!(format!("Spread: {:.2} ({:.4}%)", spread, pct), "Spread: 1.00 (1.0101%)");

    // First request only goes out after one full interval
    let ids = server.request_ids();
    assert_eq!(ids[0], 1);
    assert!(ids.len() <= 2);

    client.close();
}

#[tokio::test]
async fn test_request_ids_strictly_increase() {
    let server = MockDeribitServer::start(Reply::Silent).await;
    let sink = RecordingSink::new();
    let client = open_fast(&server, sink).await;

    tokio::time::sleep(Duration::from_millis(400)).await;
    client.close();

    let ids = server.request_ids();
    verbose_println!("  Request ids: {:?}", ids);

    assert!(ids.len() >= 3, "expected several polls, got {:?}", ids);
    assert_eq!(ids[0], 1);
    assert!(ids.windows(2).all(|w| w[1] > w[0]));

    for request in server.requests() {
        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["method"], "public/get_order_book");
    }
}

#[tokio::test]
async fn test_set_instrument_applies_to_next_requests() {
    let server = MockDeribitServer::start(Reply::EchoInstrument).await;
    let sink = RecordingSink::new();
    let client = open_fast(&server, sink.clone()).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    client.set_instrument("ETH-PERPETUAL");
    assert_eq!(&*client.instrument(), "ETH-PERPETUAL");
    assert_eq!(sink.clears(), 1);

    tokio::time::sleep(Duration::from_millis(300)).await;
    client.close();

    let instruments = server.requested_instruments();
    verbose_println!("  Requested: {:?}", instruments);

    let first_eth = instruments
        .iter()
        .position(|i| i == "ETH-PERPETUAL")
        .expect("switch observed on the wire");
    assert!(first_eth > 0);
    assert!(instruments[first_eth..].iter().all(|i| i == "ETH-PERPETUAL"));

    let latest = sink.latest().unwrap();
    assert_eq!(latest.instrument_name, "ETH-PERPETUAL");
}

#[tokio::test]
async fn test_rpc_error_does_not_publish() {
    let server = MockDeribitServer::start(Reply::RpcError {
        code: 10000,
        message: "bad".into(),
    })
    .await;
    let sink = RecordingSink::new();
    let client = open_fast(&server, sink.clone()).await;

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(sink.published().is_empty());
    let metrics = client.metrics();
    assert!(metrics.rpc_errors >= 1);
    assert_eq!(metrics.snapshots_received, 0);

    // The session survives an RPC error
    assert_eq!(client.connection_state(), ConnectionState::Connected);
    client.close();
}

#[tokio::test]
async fn test_bad_frames_do_not_stop_read_pump() {
    let server =
        MockDeribitServer::start(Reply::NoisySnapshot(sample_snapshot("BTC-PERPETUAL"))).await;
    let sink = RecordingSink::new();
    let client = open_fast(&server, sink.clone()).await;

    tokio::time::sleep(Duration::from_millis(300)).await;

    let metrics = client.metrics();
    verbose_println!("  Metrics after noisy replies: {:?}", metrics);

    // Each snapshot arrives after a garbage text frame and a binary frame
    assert!(sink.published().len() >= 2);
    assert!(metrics.decode_errors >= 1);
    assert!(metrics.snapshots_received >= 2);
    assert_eq!(client.connection_state(), ConnectionState::Connected);
    client.close();
}

#[tokio::test]
async fn test_transport_drop_keeps_last_snapshot() {
    verbose_println!("Testing server-initiated close after two snapshots...");

    let server =
        MockDeribitServer::start_with(Reply::Snapshot(sample_snapshot("BTC-PERPETUAL")), Some(2))
            .await;
    let sink = RecordingSink::new();
    let client = open_fast(&server, sink.clone()).await;

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(sink.published().len(), 2);
    assert!(client.is_closed());
    assert_eq!(client.connection_state(), ConnectionState::Closed);

    // Both pumps wind down on their own
    tokio::time::timeout(Duration::from_secs(2), client.closed())
        .await
        .expect("pumps exit after transport drop");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sink.published().len(), 2);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let server = MockDeribitServer::start(Reply::Silent).await;
    let client = open_fast(&server, RecordingSink::new()).await;

    client.close();
    client.close();
    assert!(client.is_closed());

    tokio::time::timeout(Duration::from_secs(2), client.closed())
        .await
        .expect("pumps exit after close");

    let sent = server.requests().len();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(server.requests().len(), sent);

    // Waiting again returns immediately
    client.closed().await;
}

#[tokio::test]
async fn test_connect_error() {
    // Grab a free port, then release it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = deribit::builder()
        .url(format!("ws://{}", addr))
        .open("BTC-PERPETUAL", RecordingSink::new() as Arc<dyn SnapshotSink>)
        .await;

    assert!(matches!(result, Err(DeribitError::Connect(_))));
}
