//! mediator/output.rs
//! Output adapters applied to a finished `CompressionOutcome`.
//!
//! - `CopyOut`: exact-size `Vec<u8>`, no tie to the destination allocation.
//! - `ViewOut`: `CompressedView` over the destination allocation, no copy.
use std::fmt;
use std::ops::Deref;

use bytes::Bytes;

use crate::mediator::types::CompressionOutcome;

/// Stateless final step of a compression call.
pub trait OutputAdapter {
    type Output;

    /// Appended to the access mode's entry point name (`compress` + suffix).
    const SUFFIX: &'static str;

    fn shape(outcome: CompressionOutcome) -> Self::Output;
}

/// Copies the valid prefix into a new, exactly sized buffer.
#[derive(Debug, Clone, Copy)]
pub struct CopyOut;

impl OutputAdapter for CopyOut {
    type Output = Vec<u8>;
    const SUFFIX: &'static str = "";

    fn shape(outcome: CompressionOutcome) -> Vec<u8> {
        if outcome.is_empty() {
            return Vec::new();
        }
        outcome.compressed().to_vec()
    }
}

/// Hands the destination allocation over as a capped view.
#[derive(Debug, Clone, Copy)]
pub struct ViewOut;

impl OutputAdapter for ViewOut {
    type Output = CompressedView;
    const SUFFIX: &'static str = "_to_view";

    fn shape(outcome: CompressionOutcome) -> CompressedView {
        CompressedView::from(outcome)
    }
}

/// Read-only window `[0, len)` over a possibly larger allocation.
///
/// The backing storage lives as long as the view (or any `Bytes` taken from
/// it) does. `backing_len()` is usually larger than `len()`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CompressedView {
    backing: Bytes,
    len: usize,
}

impl CompressedView {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the allocation behind the view.
    pub fn backing_len(&self) -> usize {
        self.backing.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.backing[..self.len]
    }

    /// Zero-copy handle on the visible bytes. Keeps the whole allocation alive.
    pub fn to_bytes(&self) -> Bytes {
        self.backing.slice(..self.len)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }
}

impl From<CompressionOutcome> for CompressedView {
    fn from(outcome: CompressionOutcome) -> Self {
        let (buffer, len) = outcome.into_parts();
        Self { backing: Bytes::from(buffer), len }
    }
}

impl Deref for CompressedView {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for CompressedView {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for CompressedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedView")
            .field("len", &self.len)
            .field("backing_len", &self.backing.len())
            .finish()
    }
}
