use super::null_as_zero;
use serde::{Deserialize, Serialize};

/// One price level, `[price, amount]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Level {
    pub price: f64,
    pub amount: f64,
}

impl Level {
    pub fn new(price: f64, amount: f64) -> Self {
        Self { price, amount }
    }
}

impl TryFrom<Vec<f64>> for Level {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [price, amount, ..] => Ok(Self::new(*price, *amount)),
            _ => Err(format!(
                "price level needs [price, amount], got {} element(s)",
                values.len()
            )),
        }
    }
}

impl From<Level> for [f64; 2] {
    fn from(level: Level) -> Self {
        [level.price, level.amount]
    }
}

/// 24h statistics block of an order-book snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBookStats {
    #[serde(deserialize_with = "null_as_zero")]
    pub high: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub low: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub price_change: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub volume: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub volume_usd: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub volume_notional: f64,
}

/// Full order-book state returned by `public/get_order_book`.
///
/// `asks` are ascending by price, `bids` descending, so index 0 of each side
/// is the top of book. The value is never mutated once published.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBookSnapshot {
    pub timestamp: i64,
    pub state: String,
    pub stats: OrderBookStats,
    pub change_id: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub index_price: f64,
    pub instrument_name: String,
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
    #[serde(deserialize_with = "null_as_zero")]
    pub last_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub settlement_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub min_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub max_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub open_interest: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub mark_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub interest_value: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub best_ask_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub best_bid_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub estimated_delivery_price: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub best_ask_amount: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub best_bid_amount: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub current_funding: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub funding_8h: f64,
}

impl OrderBookSnapshot {
    /// Best ask minus best bid, with the spread as a percentage of the bid.
    ///
    /// Returns `None` when either side is empty. A zero best bid yields a
    /// zero percentage instead of a division by zero.
    pub fn spread(&self) -> Option<(f64, f64)> {
        let ask = self.asks.first()?;
        let bid = self.bids.first()?;
        let spread = ask.price - bid.price;
        let pct = if bid.price != 0.0 {
            spread / bid.price * 100.0
        } else {
            0.0
        };
        Some((spread, pct))
    }
}
