//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for compression work.
//!
//! Notes:
//! - Telemetry is owned by the operation that records it. The mediator itself
//!   keeps no process-wide counters.
//! - Snapshots are serde-serializable for reports and logs.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
