use deribit::{OrderBookSnapshot, SnapshotSink, Trade};
use parking_lot::RwLock;
use std::sync::Arc;

/// Domain object a panel renders
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    None,
    OrderBook(OrderBookSnapshot),
    Trades(Vec<Trade>),
}

impl Payload {
    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }

    pub fn order_book(&self) -> Option<&OrderBookSnapshot> {
        match self {
            Payload::OrderBook(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn trades(&self) -> Option<&[Trade]> {
        match self {
            Payload::Trades(trades) => Some(trades),
            _ => None,
        }
    }
}

/// Single-value published cell shared between a writer task and the render thread.
///
/// Writers build a new [`Payload`] and swap the `Arc` in; readers clone the
/// `Arc` and render from it without holding the lock. Clones of a slot share
/// the same cell.
#[derive(Debug, Clone, Default)]
pub struct DataSlot {
    inner: Arc<RwLock<Arc<Payload>>>,
}

impl DataSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> Arc<Payload> {
        Arc::clone(&self.inner.read())
    }

    pub fn store(&self, payload: Payload) {
        *self.inner.write() = Arc::new(payload);
    }

    pub fn clear(&self) {
        self.store(Payload::None);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_none()
    }
}

impl SnapshotSink for DataSlot {
    fn publish(&self, snapshot: OrderBookSnapshot) {
        self.store(Payload::OrderBook(snapshot));
    }

    fn clear(&self) {
        DataSlot::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deribit::Direction;

    #[test]
    fn test_clones_share_the_cell() {
        let slot = DataSlot::new();
        let writer = slot.clone();
        assert!(slot.is_empty());

        writer.publish(OrderBookSnapshot {
            instrument_name: "BTC-PERPETUAL".into(),
            ..Default::default()
        });
        let payload = slot.load();
        assert_eq!(
            payload.order_book().map(|b| b.instrument_name.as_str()),
            Some("BTC-PERPETUAL")
        );

        SnapshotSink::clear(&writer);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_loaded_payload_survives_replacement() {
        let slot = DataSlot::new();
        slot.store(Payload::Trades(vec![Trade {
            price: 1.0,
            amount: 2.0,
            direction: Direction::Buy,
            timestamp: "00:00:01".into(),
        }]));

        let held = slot.load();
        slot.clear();

        assert_eq!(held.trades().map(|t| t.len()), Some(1));
        assert!(slot.load().is_none());
    }
}
