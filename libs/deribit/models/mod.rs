//! Wire and domain records exchanged with the Deribit API.

pub mod orderbook;
pub mod rpc;
pub mod trade;

pub use orderbook::{Level, OrderBookSnapshot, OrderBookStats};
pub use rpc::{OrderBookParams, RpcErrorBody, RpcRequest, RpcResponse, GET_ORDER_BOOK, JSONRPC_VERSION};
pub use trade::{Direction, Trade};

use serde::{Deserialize, Deserializer};

/// Deribit sends `null` for numeric fields that have no value yet
/// (e.g. `settlement_price` on a fresh instrument). Treat those as zero.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
