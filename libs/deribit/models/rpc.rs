use super::OrderBookSnapshot;
use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";
pub const GET_ORDER_BOOK: &str = "public/get_order_book";

/// Parameters of `public/get_order_book`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookParams {
    pub instrument_name: String,
}

/// Outgoing JSON-RPC 2.0 request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: OrderBookParams,
    pub id: u64,
}

impl RpcRequest {
    pub fn get_order_book(id: u64, instrument_name: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: GET_ORDER_BOOK.to_string(),
            params: OrderBookParams {
                instrument_name: instrument_name.into(),
            },
            id,
        }
    }
}

/// Error object carried by a failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

/// Incoming JSON-RPC 2.0 response.
///
/// Deribit also reports server-side timings (`usIn`, `usOut`, `usDiff`)
/// and whether the session is on testnet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<OrderBookSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
    #[serde(rename = "usIn", default, skip_serializing_if = "Option::is_none")]
    pub us_in: Option<i64>,
    #[serde(rename = "usOut", default, skip_serializing_if = "Option::is_none")]
    pub us_out: Option<i64>,
    #[serde(rename = "usDiff", default, skip_serializing_if = "Option::is_none")]
    pub us_diff: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet: Option<bool>,
}
