//! mediator/core.rs
//! Stable public API: the `Bridge`.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::{
    codec::{NativeCodec, ZstdCodec},
    config::BridgeConfig,
    mediator::{
        output::{CompressedView, CopyOut, OutputAdapter, ViewOut},
        pinning::{MemoryManager, RelocationGuard, StableHeap},
        types::{AccessMode, CompressionOutcome},
    },
    types::{BridgeError, NativeFailure},
};

/// Mediator between caller buffers and a native codec.
///
/// Holds no per-call state: clones share the codec and memory manager, and
/// concurrent calls from many threads are independent.
///
/// Entry points take `impl Into<Option<&[u8]>>`: pass a slice (`&data[..]`,
/// `data.as_slice()`), or `None` for an absent source. A `&Vec<u8>` does not
/// convert on its own.
#[derive(Clone)]
pub struct Bridge {
    codec: Arc<dyn NativeCodec>,
    memory: Arc<dyn MemoryManager>,
    config: BridgeConfig,
}

impl Default for Bridge {
    fn default() -> Self {
        Self::zstd()
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("codec", &self.codec.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Bridge {
    pub fn new(codec: Arc<dyn NativeCodec>) -> Self {
        Self {
            codec,
            memory: Arc::new(StableHeap),
            config: BridgeConfig::default(),
        }
    }

    /// Bridge over the linked libzstd.
    pub fn zstd() -> Self {
        Self::new(Arc::new(ZstdCodec::new()))
    }

    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Memory manager consulted by pinned calls.
    pub fn with_memory_manager(mut self, memory: Arc<dyn MemoryManager>) -> Self {
        self.memory = memory;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn codec(&self) -> &Arc<dyn NativeCodec> {
        &self.codec
    }

    /// Worst-case destination size the codec needs for `src_len` bytes.
    /// Saturates to `u64::MAX` for lengths the codec cannot bound.
    pub fn compress_bound(&self, src_len: usize) -> u64 {
        self.codec.compress_bound(src_len)
    }

    /// Standard access, copied output.
    pub fn compress<'a>(
        &self,
        src: impl Into<Option<&'a [u8]>>,
        level: i32,
    ) -> Result<Vec<u8>, BridgeError> {
        self.compress_with::<CopyOut>(src.into(), level, AccessMode::Standard)
    }

    /// Pinned access, copied output.
    pub fn compress_pinned<'a>(
        &self,
        src: impl Into<Option<&'a [u8]>>,
        level: i32,
    ) -> Result<Vec<u8>, BridgeError> {
        self.compress_with::<CopyOut>(src.into(), level, AccessMode::Pinned)
    }

    /// Standard access, zero-copy view output.
    pub fn compress_to_view<'a>(
        &self,
        src: impl Into<Option<&'a [u8]>>,
        level: i32,
    ) -> Result<CompressedView, BridgeError> {
        self.compress_with::<ViewOut>(src.into(), level, AccessMode::Standard)
    }

    /// Pinned access, zero-copy view output.
    pub fn compress_pinned_to_view<'a>(
        &self,
        src: impl Into<Option<&'a [u8]>>,
        level: i32,
    ) -> Result<CompressedView, BridgeError> {
        self.compress_with::<ViewOut>(src.into(), level, AccessMode::Pinned)
    }

    /// Any combination of access mode and output adapter.
    pub fn compress_with<A: OutputAdapter>(
        &self,
        src: Option<&[u8]>,
        level: i32,
        mode: AccessMode,
    ) -> Result<A::Output, BridgeError> {
        let src = src.ok_or_else(|| BridgeError::NullSource {
            entry: format!("{}{}", mode.entry_point(), A::SUFFIX),
        })?;
        let outcome = self.produce_outcome(src, level, mode)?;
        Ok(A::shape(outcome))
    }

    /// Bound, allocate, invoke and classify. Shared by every entry point.
    ///
    /// # Errors
    /// - `CapacityExceeded` if the bound does not fit one allocation (nothing
    ///   is allocated).
    /// - `Native` if the codec reports an error.
    /// - `Inconsistent` if the codec reports more bytes than it was given.
    pub fn produce_outcome(
        &self,
        src: &[u8],
        level: i32,
        mode: AccessMode,
    ) -> Result<CompressionOutcome, BridgeError> {
        if src.is_empty() {
            trace!("empty source, skipping codec");
            return Ok(CompressionOutcome::empty());
        }

        let bound = self.codec.compress_bound(src.len());
        let max = self.config.effective_max_buffer_len();
        if bound > max {
            warn!(
                "{}: bound {} for {}-byte source exceeds limit {}",
                mode.entry_point(), bound, src.len(), max
            );
            return Err(BridgeError::CapacityExceeded { bound, max });
        }

        // bound <= isize::MAX, so the cast is lossless.
        let mut dst = vec![0u8; bound as usize];
        trace!("allocated {} bytes for {}-byte source", dst.len(), src.len());

        let invoke = mode.resolve();
        let raw = {
            let _guard = mode
                .is_pinned()
                .then(|| RelocationGuard::acquire(self.memory.as_ref()));
            invoke(self.codec.as_ref(), src, dst.as_mut_slice(), level)
        };

        if self.codec.is_error(raw) {
            let code = self.codec.error_code(raw);
            warn!(
                "{}: {} rejected {}-byte source at level {} (code {})",
                mode.entry_point(), self.codec.name(), src.len(), level, code
            );
            return Err(NativeFailure::new(code, Arc::clone(&self.codec)).into());
        }

        let outcome = CompressionOutcome::new(dst, raw)?;
        debug!(
            "{}: {} -> {} bytes (capacity {}, level {})",
            mode.entry_point(), src.len(), outcome.actual_size(), outcome.capacity(), level
        );
        Ok(outcome)
    }
}
