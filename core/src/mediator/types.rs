//! mediator/types.rs
use crate::codec::{NativeCodec, RawResult};
use crate::types::BridgeError;

/// How the native call is given access to caller memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// The codec may copy either buffer. No constraints on the host.
    Standard,
    /// The codec works on the caller's memory directly while the host memory
    /// manager guarantees it will not move.
    ///
    /// Process-wide side effect: a host that cannot pin without suspending
    /// its collector stalls every other thread that allocates for the length
    /// of the call. Unsuitable for large buffers or latency-sensitive
    /// concurrent workloads on such hosts.
    Pinned,
}

/// Native entry point selected by an access mode.
pub(crate) type NativeEntry = fn(&dyn NativeCodec, &[u8], &mut [u8], i32) -> RawResult;

impl AccessMode {
    pub fn is_pinned(self) -> bool {
        matches!(self, AccessMode::Pinned)
    }

    /// Public entry point name for this mode with copy output.
    pub fn entry_point(self) -> &'static str {
        match self {
            AccessMode::Standard => "compress",
            AccessMode::Pinned => "compress_pinned",
        }
    }

    pub(crate) fn resolve(self) -> NativeEntry {
        match self {
            AccessMode::Standard => |codec, src, dst, level| codec.compress(src, dst, level),
            AccessMode::Pinned => |codec, src, dst, level| codec.compress_pinned(src, dst, level),
        }
    }
}

/// Destination allocation plus the length of valid compressed data in it.
///
/// Invariant: `actual_size <= buffer.len()`. Bytes past `actual_size` are
/// allocated but unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompressionOutcome {
    buffer: Vec<u8>,
    actual_size: usize,
}

impl CompressionOutcome {
    /// Fails with `Inconsistent` when `actual_size` exceeds the buffer.
    pub fn new(buffer: Vec<u8>, actual_size: usize) -> Result<Self, BridgeError> {
        if actual_size > buffer.len() {
            return Err(BridgeError::Inconsistent {
                actual: actual_size,
                capacity: buffer.len(),
            });
        }
        Ok(Self { buffer, actual_size })
    }

    /// Outcome for a zero-length source; nothing is allocated.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn actual_size(&self) -> usize {
        self.actual_size
    }

    /// Length of the whole destination allocation.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual_size == 0
    }

    /// Valid compressed bytes.
    pub fn compressed(&self) -> &[u8] {
        &self.buffer[..self.actual_size]
    }

    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.buffer, self.actual_size)
    }
}
