use serde::{Deserialize, Serialize};

/// Taker side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

/// A single executed trade as shown in the trades panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub price: f64,
    pub amount: f64,
    pub direction: Direction,
    /// Already formatted for display (e.g. `14:02:11`)
    pub timestamp: String,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.direction == Direction::Buy
    }
}
