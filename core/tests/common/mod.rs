//! Test doubles for the native codec and the host memory manager.
#![allow(dead_code)]

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use zbridge_core::{ErrorCode, MemoryManager, NativeCodec, RawResult, ZstdErrorKind};

/// Raw values at or above this encode an error in the stub's scheme.
const ERROR_FLOOR: usize = usize::MAX - 1_000;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn encode_error(code: ErrorCode) -> RawResult {
    usize::MAX - code as usize
}

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Copy the source into the destination and report its length.
    Echo,
    /// Report a fixed size without writing anything.
    Size(usize),
    /// Report an encoded error.
    Error(ErrorCode),
    Panic,
}

pub struct StubCodec {
    reply: Reply,
    bound: Option<u64>,
    observed: OnceLock<Arc<CountingMemory>>,
    pub compress_calls: AtomicUsize,
    pub pinned_calls: AtomicUsize,
    pub bound_queries: AtomicUsize,
    pub name_lookups: AtomicUsize,
    pub saw_pin_held: AtomicBool,
}

impl StubCodec {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            bound: None,
            observed: OnceLock::new(),
            compress_calls: AtomicUsize::new(0),
            pinned_calls: AtomicUsize::new(0),
            bound_queries: AtomicUsize::new(0),
            name_lookups: AtomicUsize::new(0),
            saw_pin_held: AtomicBool::new(false),
        }
    }

    pub fn echo() -> Self {
        Self::new(Reply::Echo)
    }

    pub fn failing(kind: ZstdErrorKind) -> Self {
        Self::new(Reply::Error(kind.code()))
    }

    pub fn with_bound(mut self, bound: u64) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Record whether `memory` is held while `compress_pinned` runs.
    pub fn observing(self, memory: Arc<CountingMemory>) -> Self {
        let _ = self.observed.set(memory);
        self
    }

    pub fn native_calls(&self) -> usize {
        self.compress_calls.load(Ordering::SeqCst) + self.pinned_calls.load(Ordering::SeqCst)
    }

    pub fn bound_queries(&self) -> usize {
        self.bound_queries.load(Ordering::SeqCst)
    }

    pub fn name_lookups(&self) -> usize {
        self.name_lookups.load(Ordering::SeqCst)
    }

    fn reply(&self, src: &[u8], dst: &mut [u8]) -> RawResult {
        match self.reply {
            Reply::Echo => {
                dst[..src.len()].copy_from_slice(src);
                src.len()
            }
            Reply::Size(size) => size,
            Reply::Error(code) => encode_error(code),
            Reply::Panic => panic!("stub codec panicked"),
        }
    }
}

impl NativeCodec for StubCodec {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn compress(&self, src: &[u8], dst: &mut [u8], _level: i32) -> RawResult {
        self.compress_calls.fetch_add(1, Ordering::SeqCst);
        self.reply(src, dst)
    }

    fn compress_pinned(&self, src: &[u8], dst: &mut [u8], _level: i32) -> RawResult {
        self.pinned_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(memory) = self.observed.get() {
            self.saw_pin_held.store(memory.is_held(), Ordering::SeqCst);
        }
        self.reply(src, dst)
    }

    fn compress_bound(&self, src_len: usize) -> u64 {
        self.bound_queries.fetch_add(1, Ordering::SeqCst);
        self.bound.unwrap_or(src_len as u64 + 16)
    }

    fn is_error(&self, raw: RawResult) -> bool {
        raw >= ERROR_FLOOR
    }

    fn error_code(&self, raw: RawResult) -> ErrorCode {
        (usize::MAX - raw) as ErrorCode
    }

    fn error_name(&self, code: ErrorCode) -> Cow<'static, str> {
        self.name_lookups.fetch_add(1, Ordering::SeqCst);
        let text = ZstdErrorKind::from_code(code)
            .map(ZstdErrorKind::description)
            .unwrap_or("unknown stub error");
        Cow::Owned(format!("stub: {}", text))
    }
}

/// Memory manager that counts suspensions.
#[derive(Default)]
pub struct CountingMemory {
    suspended: AtomicUsize,
    resumed: AtomicUsize,
}

impl CountingMemory {
    pub fn acquires(&self) -> usize {
        self.suspended.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.resumed.load(Ordering::SeqCst)
    }

    pub fn is_held(&self) -> bool {
        self.acquires() > self.releases()
    }
}

impl MemoryManager for CountingMemory {
    fn suspend_relocation(&self) {
        self.suspended.fetch_add(1, Ordering::SeqCst);
    }

    fn resume_relocation(&self) {
        self.resumed.fetch_add(1, Ordering::SeqCst);
    }
}
