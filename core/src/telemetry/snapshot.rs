//! telemetry/snapshot.rs
//!
//! Immutable view of counters and timings at the end of an operation.
//! Ratio is capped at 1.0 (incompressible input reports 1.0, not more).
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub calls: u64,
    pub bytes_in: u64,
    pub bytes_allocated: u64,
    pub bytes_out: u64,
    pub compression_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if counters.bytes_in > 0 {
            (counters.bytes_out as f64 / counters.bytes_in as f64).min(1.0)
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_in as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            calls: counters.calls,
            bytes_in: counters.bytes_in,
            bytes_allocated: counters.bytes_allocated,
            bytes_out: counters.bytes_out,
            compression_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants:
    /// - output never exceeds the allocation
    /// - ratio <= 1.0
    /// - stage time fits in elapsed time
    pub fn sanity_check(&self) -> bool {
        self.bytes_out <= self.bytes_allocated
            && self.compression_ratio <= 1.0
            && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
