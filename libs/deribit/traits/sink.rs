use crate::models::OrderBookSnapshot;

/// Destination for decoded order-book snapshots.
///
/// The read pump calls [`publish`](SnapshotSink::publish) once per successful
/// response and [`clear`](SnapshotSink::clear) is called when the polled
/// instrument changes. Implementations must replace their published value in a
/// single step; readers on other threads should never observe a partial write.
pub trait SnapshotSink: Send + Sync + 'static {
    /// Replace the current snapshot (last writer wins)
    fn publish(&self, snapshot: OrderBookSnapshot);

    /// Drop the current snapshot so consumers fall back to their placeholder
    fn clear(&self);
}
