//! codec/mod.rs
//! Native codec capability surface.
//!
//! Design notes:
//! - The codec is an opaque leaf: it compresses into a caller-provided buffer
//!   and reports either a byte count or an encoded error in one `usize`.
//! - Classification of that raw value always goes through the codec itself
//!   (`is_error`), never through sign or magnitude checks in the caller.
//! - `ZstdErrorKind` is the closed set of structured codes libzstd reports.

pub mod types;
pub mod zstd;

pub use self::types::*;
pub use self::zstd::*;
