//! Common test utilities for the market-data client integration tests
//!
//! Provides a scripted JSON-RPC websocket peer and a recording snapshot sink.

#![allow(dead_code)]

use deribit::{OrderBookSnapshot, SnapshotSink};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio_tungstenite::tungstenite::Message;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// How the mock peer answers each request
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer every request with this `result` object
    Snapshot(Value),
    /// Answer with a snapshot for whatever `instrument_name` was requested
    EchoInstrument,
    /// Answer every request with an error object
    RpcError { code: i64, message: String },
    /// Precede each snapshot with an undecodable text frame and a binary frame
    NoisySnapshot(Value),
    /// Read requests but never answer
    Silent,
}

/// The book used by the happy-path scenarios
pub fn sample_snapshot(instrument: &str) -> Value {
    json!({
        "timestamp": 1_700_000_000_000i64,
        "state": "open",
        "change_id": 42,
        "instrument_name": instrument,
        "asks": [[100.00, 1.0], [101.00, 2.0]],
        "bids": [[99.00, 3.0], [98.00, 4.0]],
        "best_ask_price": 100.0,
        "best_bid_price": 99.0,
        "best_ask_amount": 1.0,
        "best_bid_amount": 3.0,
        "last_price": 99.5,
        "mark_price": 99.6,
        "index_price": 99.4,
        "settlement_price": null,
        "funding_8h": 0.0001,
        "stats": {"high": 105.0, "low": 95.0, "price_change": 1.25, "volume": 1200.0}
    })
}

/// A scripted Deribit peer on 127.0.0.1
pub struct MockDeribitServer {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockDeribitServer {
    /// Create and start a new mock server that never closes on its own
    pub async fn start(reply: Reply) -> Self {
        Self::start_with(reply, None).await
    }

    /// Start a mock server that closes each session after `close_after` replies
    pub async fn start_with(reply: Reply, close_after: Option<usize>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let shutdown_clone = shutdown.clone();
        let requests_clone = requests.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let shutdown = shutdown_clone.clone();
                                let requests = requests_clone.clone();
                                let reply = reply.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, reply, close_after, requests, shutdown).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown,
            requests,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        reply: Reply,
        close_after: Option<usize>,
        requests: Arc<Mutex<Vec<Value>>>,
        shutdown: Arc<Notify>,
    ) {
        let ws_stream = match tokio_tungstenite::accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();
        let mut replies = 0usize;

        loop {
            tokio::select! {
                msg = read.next() => {
                    let text = match msg {
                        Some(Ok(Message::Text(text))) => text,
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => continue,
                    };

                    let request: Value = match serde_json::from_str(&text) {
                        Ok(v) => v,
                        Err(_) => continue,
                    };
                    requests.lock().push(request.clone());

                    let Some(body) = Self::respond(&reply, &request) else {
                        continue;
                    };
                    if matches!(reply, Reply::NoisySnapshot(_)) {
                        let noise = [
                            Message::Text("this is not json".to_string()),
                            Message::Binary(vec![0xde, 0xad, 0xbe, 0xef]),
                        ];
                        for frame in noise {
                            if write.send(frame).await.is_err() {
                                return;
                            }
                        }
                    }
                    if write.send(Message::Text(body.to_string())).await.is_err() {
                        break;
                    }

                    replies += 1;
                    if close_after == Some(replies) {
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                }
                _ = shutdown.notified() => {
                    break;
                }
            }
        }
    }

    fn respond(reply: &Reply, request: &Value) -> Option<Value> {
        let id = request["id"].clone();
        match reply {
            Reply::Snapshot(result) | Reply::NoisySnapshot(result) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result,
                "usIn": 1_700_000_000_000_000i64,
                "usOut": 1_700_000_000_000_150i64,
                "usDiff": 150,
                "testnet": false
            })),
            Reply::EchoInstrument => {
                let instrument = request["params"]["instrument_name"]
                    .as_str()
                    .unwrap_or_default();
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": sample_snapshot(instrument)
                }))
            }
            Reply::RpcError { code, message } => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": code, "message": message}
            })),
            Reply::Silent => None,
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    pub fn request_ids(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .filter_map(|r| r["id"].as_u64())
            .collect()
    }

    pub fn requested_instruments(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r["params"]["instrument_name"].as_str().map(str::to_string))
            .collect()
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockDeribitServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Sink that keeps every published snapshot and counts clears
#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<OrderBookSnapshot>>,
    clears: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn published(&self) -> Vec<OrderBookSnapshot> {
        self.published.lock().clone()
    }

    pub fn latest(&self) -> Option<OrderBookSnapshot> {
        self.published.lock().last().cloned()
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl SnapshotSink for RecordingSink {
    fn publish(&self, snapshot: OrderBookSnapshot) {
        self.published.lock().push(snapshot);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}
