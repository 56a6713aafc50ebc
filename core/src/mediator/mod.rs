//! mediator/mod.rs
//! Buffer lifecycle between the caller and the native codec.
//!
//! One call runs: validate -> bound -> allocate -> invoke (standard or pinned)
//! -> classify -> shape (copy or view). The two axes are independent: the
//! access mode only picks the native entry point, the output adapter only
//! decides what the caller receives.

pub mod core;
pub mod output;
pub mod pinning;
pub mod types;

pub use self::core::*;
pub use output::*;
pub use pinning::*;
pub use types::*;
