//! codec/zstd.rs
//!
//! libzstd binding for the `NativeCodec` capability.
//!
//! Design notes:
//! - Compression goes through `zstd-safe`; the raw `size_t` result is kept as is
//!   so the mediator classifies it through `is_error`.
//! - `ZSTD_isError` and `ZSTD_getErrorCode` are not wrapped by `zstd-safe`, so
//!   they are called on `zstd-sys` directly. They only inspect an integer.
//! - Error names are resolved by turning the structured code back into the
//!   encoded form libzstd expects (`(size_t)-code`).
#![allow(unsafe_code)]

use std::borrow::Cow;

use zstd_safe::zstd_sys;

use crate::codec::types::{ErrorCode, NativeCodec, RawResult};

/// The process-wide libzstd instance.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZstdCodec;

impl ZstdCodec {
    pub fn new() -> Self {
        Self
    }

    /// Version of the linked libzstd, e.g. `10505` for 1.5.5.
    pub fn version_number(&self) -> u32 {
        zstd_safe::version_number()
    }

    pub fn max_level(&self) -> i32 {
        zstd_safe::max_c_level()
    }

    pub fn min_level(&self) -> i32 {
        zstd_safe::min_c_level()
    }
}

impl NativeCodec for ZstdCodec {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> RawResult {
        match zstd_safe::compress(dst, src, level) {
            Ok(written) => written,
            Err(code) => code,
        }
    }

    fn compress_bound(&self, src_len: usize) -> u64 {
        // libzstd answers oversized lengths with an encoded error, not a size.
        let bound = zstd_safe::compress_bound(src_len);
        if self.is_error(bound) {
            u64::MAX
        } else {
            bound as u64
        }
    }

    fn is_error(&self, raw: RawResult) -> bool {
        // SAFETY: pure function over an integer.
        unsafe { zstd_sys::ZSTD_isError(raw) != 0 }
    }

    fn error_code(&self, raw: RawResult) -> ErrorCode {
        // SAFETY: pure function over an integer.
        unsafe { zstd_sys::ZSTD_getErrorCode(raw) as ErrorCode }
    }

    fn error_name(&self, code: ErrorCode) -> Cow<'static, str> {
        let encoded = 0usize.wrapping_sub(code as usize);
        Cow::Borrowed(zstd_safe::get_error_name(encoded))
    }
}
