//! Common test utilities for the dashboard integration tests
//!
//! An echoing Deribit peer: every `public/get_order_book` request is answered
//! with a two-level book for the requested instrument.

#![allow(dead_code)]

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio_tungstenite::tungstenite::Message;

pub struct EchoServer {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
    instruments: Arc<Mutex<Vec<String>>>,
}

impl EchoServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let instruments = Arc::new(Mutex::new(Vec::new()));

        let stop = shutdown.clone();
        let seen = instruments.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { break };
                        let seen = seen.clone();
                        let stop = stop.clone();
                        tokio::spawn(async move { Self::serve(stream, seen, stop).await });
                    }
                    _ = stop.notified() => break,
                }
            }
        });

        Self {
            addr,
            shutdown,
            instruments,
        }
    }

    async fn serve(
        stream: tokio::net::TcpStream,
        seen: Arc<Mutex<Vec<String>>>,
        stop: Arc<Notify>,
    ) {
        let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
            return;
        };
        let (mut write, mut read) = ws.split();

        loop {
            tokio::select! {
                msg = read.next() => {
                    let text = match msg {
                        Some(Ok(Message::Text(text))) => text,
                        Some(Ok(_)) => continue,
                        _ => break,
                    };
                    let Ok(request) = serde_json::from_str::<Value>(&text) else { continue };
                    let instrument = request["params"]["instrument_name"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().push(instrument.clone());

                    let reply = json!({
                        "jsonrpc": "2.0",
                        "id": request["id"],
                        "result": {
                            "instrument_name": instrument,
                            "state": "open",
                            "asks": [[100.00, 1.0], [101.00, 2.0]],
                            "bids": [[99.00, 3.0], [98.00, 4.0]],
                            "last_price": 99.5,
                            "mark_price": 99.6,
                            "index_price": 99.4,
                            "stats": {"high": 105.0, "low": 95.0, "price_change": 1.25, "volume": 1200.0}
                        }
                    });
                    if write.send(Message::Text(reply.to_string())).await.is_err() {
                        break;
                    }
                }
                _ = stop.notified() => break,
            }
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// `instrument_name` of every request received, in arrival order
    pub fn requested_instruments(&self) -> Vec<String> {
        self.instruments.lock().clone()
    }
}

impl Drop for EchoServer {
    fn drop(&mut self) {
        self.shutdown.notify_waiters();
    }
}
