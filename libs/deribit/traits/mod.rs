//! Error type and the sink seam between the client and whatever renders its snapshots.

pub mod error;
pub mod sink;

pub use error::{DeribitError, Result};
pub use sink::SnapshotSink;
