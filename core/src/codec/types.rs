//! codec/types.rs
//! Capability trait and error taxonomy for the native codec.
use std::borrow::Cow;
use std::fmt;

use num_enum::TryFromPrimitive;

use crate::constants::NO_ERROR_CODE;
use crate::utils::enum_name_or_hex;

/// Raw codec return value: a byte count or an encoded error.
pub type RawResult = usize;

/// Structured native error code (`0` is "no error").
pub type ErrorCode = u32;

/// Capability exposed by a native block codec.
///
/// Implementations are shared process-wide and must be stateless from the
/// caller's point of view, hence `Send + Sync`.
pub trait NativeCodec: Send + Sync {
    /// Short codec name used in messages and logs.
    fn name(&self) -> &'static str;

    /// Compress `src` into `dst`. The codec may work on an internal copy of
    /// either buffer.
    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> RawResult;

    /// Same contract as [`NativeCodec::compress`], but the codec is handed the
    /// caller's memory directly. Only called while the memory manager
    /// guarantees no relocation.
    fn compress_pinned(&self, src: &[u8], dst: &mut [u8], level: i32) -> RawResult {
        self.compress(src, dst, level)
    }

    /// Worst-case compressed size for `src_len` input bytes.
    ///
    /// `u64::MAX` when the length is too large for the codec to bound.
    fn compress_bound(&self, src_len: usize) -> u64;

    /// Whether a raw return value encodes an error.
    fn is_error(&self, raw: RawResult) -> bool;

    /// Extract the structured code from an error return value.
    fn error_code(&self, raw: RawResult) -> ErrorCode;

    /// Human-readable name for a structured code.
    fn error_name(&self, code: ErrorCode) -> Cow<'static, str>;
}

/// Structured error codes reported by libzstd (`zstd_errors.h`).
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ZstdErrorKind {
    NoError                      = 0,
    Generic                      = 1,
    PrefixUnknown                = 10,
    VersionUnsupported           = 12,
    FrameParameterUnsupported    = 14,
    FrameParameterWindowTooLarge = 16,
    CorruptionDetected           = 20,
    ChecksumWrong                = 22,
    DictionaryCorrupted          = 30,
    DictionaryWrong              = 32,
    DictionaryCreationFailed     = 34,
    ParameterUnsupported         = 40,
    ParameterOutOfBound          = 42,
    TableLogTooLarge             = 44,
    MaxSymbolValueTooLarge       = 46,
    MaxSymbolValueTooSmall       = 48,
    StageWrong                   = 60,
    InitMissing                  = 62,
    MemoryAllocation             = 64,
    WorkSpaceTooSmall            = 66,
    DstSizeTooSmall              = 70,
    SrcSizeWrong                 = 72,
    DstBufferNull                = 74,
}

impl ZstdErrorKind {
    const ALL: [ZstdErrorKind; 23] = [
        ZstdErrorKind::NoError,
        ZstdErrorKind::Generic,
        ZstdErrorKind::PrefixUnknown,
        ZstdErrorKind::VersionUnsupported,
        ZstdErrorKind::FrameParameterUnsupported,
        ZstdErrorKind::FrameParameterWindowTooLarge,
        ZstdErrorKind::CorruptionDetected,
        ZstdErrorKind::ChecksumWrong,
        ZstdErrorKind::DictionaryCorrupted,
        ZstdErrorKind::DictionaryWrong,
        ZstdErrorKind::DictionaryCreationFailed,
        ZstdErrorKind::ParameterUnsupported,
        ZstdErrorKind::ParameterOutOfBound,
        ZstdErrorKind::TableLogTooLarge,
        ZstdErrorKind::MaxSymbolValueTooLarge,
        ZstdErrorKind::MaxSymbolValueTooSmall,
        ZstdErrorKind::StageWrong,
        ZstdErrorKind::InitMissing,
        ZstdErrorKind::MemoryAllocation,
        ZstdErrorKind::WorkSpaceTooSmall,
        ZstdErrorKind::DstSizeTooSmall,
        ZstdErrorKind::SrcSizeWrong,
        ZstdErrorKind::DstBufferNull,
    ];

    /// Every known code, in ascending order.
    pub fn all() -> &'static [ZstdErrorKind] {
        &Self::ALL
    }

    pub fn code(self) -> ErrorCode {
        self as ErrorCode
    }

    pub fn from_code(code: ErrorCode) -> Option<Self> {
        Self::try_from_primitive(code).ok()
    }

    pub fn is_success(self) -> bool {
        self.code() == NO_ERROR_CODE
    }

    /// Canonical libzstd description for this code.
    pub fn description(self) -> &'static str {
        use ZstdErrorKind::*;
        match self {
            NoError                      => "No error detected",
            Generic                      => "Error (generic)",
            PrefixUnknown                => "Unknown frame descriptor",
            VersionUnsupported           => "Version not supported",
            FrameParameterUnsupported    => "Unsupported frame parameter",
            FrameParameterWindowTooLarge => "Frame requires too much memory for decoding",
            CorruptionDetected           => "Data corruption detected",
            ChecksumWrong                => "Restored data doesn't match checksum",
            DictionaryCorrupted          => "Dictionary is corrupted",
            DictionaryWrong              => "Dictionary mismatch",
            DictionaryCreationFailed     => "Cannot create Dictionary from provided samples",
            ParameterUnsupported         => "Unsupported parameter",
            ParameterOutOfBound          => "Parameter is out of bound",
            TableLogTooLarge             => "tableLog requires too much memory : unsupported",
            MaxSymbolValueTooLarge       => "Unsupported max Symbol Value : too large",
            MaxSymbolValueTooSmall       => "Specified maxSymbolValue is too small",
            StageWrong                   => "Operation not authorized at current processing stage",
            InitMissing                  => "Context should be init first",
            MemoryAllocation             => "Allocation error : not enough memory",
            WorkSpaceTooSmall            => "workSpace buffer is not large enough",
            DstSizeTooSmall              => "Destination buffer is too small",
            SrcSizeWrong                 => "Src size is incorrect",
            DstBufferNull                => "Operation on NULL destination buffer",
        }
    }

    /// Variant name for known codes, hex for anything else.
    pub fn label(code: ErrorCode) -> String {
        enum_name_or_hex::<ZstdErrorKind>(code)
    }
}

impl fmt::Display for ZstdErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<ZstdErrorKind> for ErrorCode {
    fn from(kind: ZstdErrorKind) -> Self {
        kind.code()
    }
}
