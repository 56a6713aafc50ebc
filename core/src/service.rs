//! service.rs
//!
//! Compress a file on disk into a sibling `.zst` file.
//!
//! Design notes:
//! - Uses the standard access mode and copy output: the result is written out
//!   immediately, so a view would only keep the larger allocation alive.
//! - Existing targets are refused unless the caller opts into replacing them.
//!   The refusal is enforced when the target is opened (`create_new`), so a
//!   file that appears mid-call is never clobbered.
//! - A failed write removes the partial target.
//! - Stage timings go into a per-call `TelemetrySnapshot`.
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    constants::ZST_EXTENSION,
    mediator::{AccessMode, Bridge, CopyOut, OutputAdapter},
    telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer},
    types::BridgeError,
    utils::format_bytes,
};

/// `notes.txt` -> `notes.txt.zst`
pub fn target_path_for(source: &Path) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(".");
    name.push(ZST_EXTENSION);
    PathBuf::from(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    #[default]
    Refuse,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub telemetry: TelemetrySnapshot,
}

impl CompressionReport {
    /// Share of the original size saved; negative when the output grew.
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (self.original_size as f64 - self.compressed_size as f64) / self.original_size as f64 * 100.0
    }

    /// One-line summary, e.g. `a.txt.zst: 10.0 KB -> 52.0 Bytes (99.49% saved)`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {} ({:.2}% saved)",
            self.target.display(),
            format_bytes(self.original_size),
            format_bytes(self.compressed_size),
            self.savings_percent()
        )
    }
}

#[derive(Debug, Clone)]
pub struct FileCompressor {
    bridge: Bridge,
    level: i32,
    overwrite: OverwritePolicy,
}

impl FileCompressor {
    pub fn new(bridge: Bridge) -> Self {
        let level = bridge.config().default_level;
        Self { bridge, level, overwrite: OverwritePolicy::default() }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Compress `source` into `target` (default: `target_path_for(source)`).
    ///
    /// # Errors
    /// - `TargetExists` under `OverwritePolicy::Refuse`.
    /// - `Io` for read or write failures.
    /// - Any mediator failure.
    pub fn compress_file(
        &self,
        source: &Path,
        target: Option<&Path>,
    ) -> Result<CompressionReport, BridgeError> {
        let target = target
            .map(Path::to_path_buf)
            .unwrap_or_else(|| target_path_for(source));
        // Early out only; `write_target` is what enforces the policy.
        if self.overwrite == OverwritePolicy::Refuse && target.exists() {
            return Err(BridgeError::TargetExists { path: target });
        }

        let mut timer = TelemetryTimer::new();
        let data = timer
            .time(Stage::Read, || fs::read(source))
            .map_err(|e| BridgeError::io(source, e))?;

        let outcome = timer.time(Stage::Compress, || {
            self.bridge.produce_outcome(&data, self.level, AccessMode::Standard)
        })?;
        info!(
            "file compression performed in {:?}",
            timer.stage_times.get(Stage::Compress)
        );

        let allocated = outcome.capacity();
        let compressed = timer.time(Stage::Shape, || CopyOut::shape(outcome));

        timer.time(Stage::Write, || self.write_target(&target, &compressed))?;
        timer.finish();
        for (stage, dur) in timer.stage_times.iter() {
            debug!("{} stage of {}: {:?}", stage, source.display(), dur);
        }

        let mut counters = TelemetryCounters::default();
        counters.add_call(data.len(), allocated, compressed.len());

        let report = CompressionReport {
            source: source.to_path_buf(),
            target,
            original_size: data.len() as u64,
            compressed_size: compressed.len() as u64,
            telemetry: TelemetrySnapshot::from(&counters, &timer),
        };
        info!("{}", report.summary());
        Ok(report)
    }

    fn write_target(&self, target: &Path, data: &[u8]) -> Result<(), BridgeError> {
        let mut options = OpenOptions::new();
        options.write(true);
        match self.overwrite {
            OverwritePolicy::Refuse => options.create_new(true),
            OverwritePolicy::Replace => options.create(true).truncate(true),
        };

        let mut file = options.open(target).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => BridgeError::TargetExists {
                path: target.to_path_buf(),
            },
            _ => BridgeError::io(target, e),
        })?;

        if let Err(e) = file.write_all(data) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(target) {
                warn!("could not remove partial target {}: {}", target.display(), cleanup);
            }
            return Err(BridgeError::io(target, e));
        }
        Ok(())
    }
}
