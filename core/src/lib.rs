//! zbridge-core
//!
//! Buffer and error mediator over the native zstd codec.
//! No Python, no PyO3.
//!
//! ```rust,no_run
//! use zbridge_core::Bridge;
//!
//! let bridge = Bridge::zstd();
//! let data = vec![b'a'; 10_000];
//!
//! let copied = bridge.compress(&data[..], 3).unwrap();
//! let view = bridge.compress_to_view(&data[..], 3).unwrap();
//! assert_eq!(copied.as_slice(), view.as_slice());
//! ```

#![deny(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

pub mod codec;
pub mod mediator;
pub mod service;
pub mod telemetry;

pub use codec::{ErrorCode, NativeCodec, RawResult, ZstdCodec, ZstdErrorKind};
pub use config::BridgeConfig;
pub use mediator::{
    AccessMode, Bridge, CompressedView, CompressionOutcome, CopyOut, MemoryManager,
    OutputAdapter, RelocationGuard, StableHeap, ViewOut,
};
pub use types::{BridgeError, NativeFailure};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{NativeCodec, ZstdCodec, ZstdErrorKind};
    pub use crate::config::BridgeConfig;
    pub use crate::mediator::{AccessMode, Bridge, CompressedView};
    pub use crate::service::{FileCompressor, OverwritePolicy};
    pub use crate::types::{BridgeError, NativeFailure};
}
