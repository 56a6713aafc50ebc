//! constants.rs
//! Defaults shared by the mediator, configuration and the file service.

/// Default compression level (libzstd's own default).
pub const DEFAULT_LEVEL: i32 = 3;

/// Largest destination buffer the platform can allocate.
/// Rust allocations are capped at `isize::MAX` bytes.
pub const MAX_BUFFER_LEN: u64 = isize::MAX as u64;

/// Extension appended to a source path by the file service.
pub const ZST_EXTENSION: &str = "zst";

/// Structured code meaning "no error".
pub const NO_ERROR_CODE: u32 = 0;
