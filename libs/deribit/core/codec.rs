//! Frame encoding and decoding for the JSON-RPC session.

use crate::models::{OrderBookSnapshot, RpcErrorBody, RpcRequest};
use crate::traits::{DeribitError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Envelope as it arrives; `result` stays untyped until the error check is done
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// Serialize a `public/get_order_book` request
pub fn encode_request(id: u64, instrument_name: &str) -> Result<String> {
    serde_json::to_string(&RpcRequest::get_order_book(id, instrument_name))
        .map_err(|e| DeribitError::Decode(format!("failed to encode request: {}", e)))
}

/// Decode one text frame.
///
/// - `error` populated: [`DeribitError::Rpc`], even if `result` is also present
/// - `result` populated: the snapshot
/// - neither (e.g. a server notification): `Ok(None)`
/// - anything that is not a response envelope: [`DeribitError::Decode`]
pub fn decode_frame(text: &str) -> Result<Option<OrderBookSnapshot>> {
    let envelope: Envelope = serde_json::from_str(text)?;

    if let Some(error) = envelope.error {
        return Err(DeribitError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    match envelope.result {
        Some(result) => Ok(Some(serde_json::from_value(result)?)),
        None => Ok(None),
    }
}
