//! telemetry/counters.rs
//! Mutable counters collected while compressing.
//!
//! Converted into an immutable `TelemetrySnapshot` once the work is done.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub calls: u64,
    /// Source bytes handed to the codec.
    pub bytes_in: u64,
    /// Destination bytes allocated from the bound.
    pub bytes_allocated: u64,
    /// Valid compressed bytes produced.
    pub bytes_out: u64,
}

impl TelemetryCounters {
    /// Record one compression call.
    ///
    /// - `src_len`: source length
    /// - `allocated`: destination allocation length (`0` for empty sources)
    /// - `out_len`: compressed length
    pub fn add_call(&mut self, src_len: usize, allocated: usize, out_len: usize) {
        self.calls += 1;
        self.bytes_in += src_len as u64;
        self.bytes_allocated += allocated as u64;
        self.bytes_out += out_len as u64;
    }

    /// Allocated but unused destination bytes.
    pub fn slack_bytes(&self) -> u64 {
        self.bytes_allocated.saturating_sub(self.bytes_out)
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.calls += other.calls;
        self.bytes_in += other.bytes_in;
        self.bytes_allocated += other.bytes_allocated;
        self.bytes_out += other.bytes_out;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
