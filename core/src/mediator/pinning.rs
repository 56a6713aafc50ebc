//! mediator/pinning.rs
//! Scoped "no-relocation" guarantees for pinned calls.
//!
//! Design notes:
//! - A host memory manager may move or reclaim buffers at any time. Pinned
//!   calls hold a `RelocationGuard` for their whole duration.
//! - The guard releases on drop, so every exit path (error return or unwind)
//!   resumes the host.
//! - Suspension is process-wide on hosts without true pinning; the manager
//!   decides what that costs.
use log::trace;

/// Host memory manager that can promise not to move memory for a while.
pub trait MemoryManager: Send + Sync {
    /// Stop relocating or reclaiming memory until `resume_relocation`.
    fn suspend_relocation(&self);

    /// Undo one `suspend_relocation`.
    fn resume_relocation(&self);
}

/// Rust heap allocations never move, so there is nothing to suspend.
#[derive(Debug, Default, Clone, Copy)]
pub struct StableHeap;

impl MemoryManager for StableHeap {
    fn suspend_relocation(&self) {}

    fn resume_relocation(&self) {}
}

/// Held for the duration of a pinned native call.
#[must_use = "relocation resumes as soon as the guard is dropped"]
pub struct RelocationGuard<'a> {
    manager: &'a dyn MemoryManager,
}

impl<'a> RelocationGuard<'a> {
    pub fn acquire(manager: &'a dyn MemoryManager) -> Self {
        manager.suspend_relocation();
        trace!("relocation suspended");
        Self { manager }
    }
}

impl Drop for RelocationGuard<'_> {
    fn drop(&mut self) {
        self.manager.resume_relocation();
        trace!("relocation resumed");
    }
}
