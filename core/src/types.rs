//! types.rs
//! Crate-wide error type.
//!
//! Three families a caller must be able to tell apart:
//! - misuse (`NullSource`), rejected before anything is allocated;
//! - resource limits (`CapacityExceeded`), rejected before allocation;
//! - codec rejections (`Native`), carrying the structured libzstd code.
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::codec::{ErrorCode, NativeCodec, ZstdErrorKind};

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Absent source buffer at a public entry point.
    #[error("source buffer cannot be absent for {entry}")]
    NullSource { entry: String },

    /// Worst-case bound does not fit in a single allocation.
    #[error("compressed data bound ({bound}) exceeds maximum buffer length ({max})")]
    CapacityExceeded { bound: u64, max: u64 },

    /// The codec rejected the input.
    #[error(transparent)]
    Native(#[from] NativeFailure),

    /// The codec claimed to write past the destination it was given.
    #[error("internal consistency failure: {actual} bytes reported for a {capacity}-byte destination")]
    Inconsistent { actual: usize, capacity: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("target already exists: {}", .path.display())]
    TargetExists { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// Caller misuse, as opposed to a codec or environment failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, BridgeError::NullSource { .. })
    }

    pub fn is_capacity(&self) -> bool {
        matches!(self, BridgeError::CapacityExceeded { .. })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, BridgeError::Native(_))
    }

    pub fn native(&self) -> Option<&NativeFailure> {
        match self {
            BridgeError::Native(failure) => Some(failure),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BridgeError::Io { path: path.into(), source }
    }
}

/// A codec-reported failure.
///
/// Only the structured code is captured; the name is looked up from the codec
/// when the failure is displayed or `name()` is called.
#[derive(Clone)]
pub struct NativeFailure {
    code: ErrorCode,
    codec: Arc<dyn NativeCodec>,
}

impl NativeFailure {
    pub fn new(code: ErrorCode, codec: Arc<dyn NativeCodec>) -> Self {
        Self { code, codec }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Known taxonomy entry, if the code is one libzstd documents.
    pub fn kind(&self) -> Option<ZstdErrorKind> {
        ZstdErrorKind::from_code(self.code)
    }

    pub fn name(&self) -> Cow<'static, str> {
        self.codec.error_name(self.code)
    }

    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }
}

impl fmt::Display for NativeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {} (code: {})", self.codec.name(), self.name(), self.code)
    }
}

impl fmt::Debug for NativeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFailure")
            .field("codec", &self.codec.name())
            .field("code", &self.code)
            .field("kind", &ZstdErrorKind::label(self.code))
            .finish()
    }
}

impl std::error::Error for NativeFailure {}
