//! Feature Scheduler (C10, §4.10).
//!
//! The engine that wires the recursive feature tree (C7), worker process
//! manager (C9), auto model selector (C4), budget governor (C5), context
//! budget allocator (C6), fault isolation engine (C8), and progress store
//! (C11) into the dependency-ordered dispatch and retry loop described in
//! §4.10. Grounded on `core/loop/src/driver.rs`'s channel-driven main loop
//! and `core/loop/src/fallback.rs`'s retry-on-failure bookkeeping.

pub mod decision;
mod engine;
pub mod error;
pub mod plan;

pub use engine::AutoOutcome;
pub use engine::Scheduler;
pub use error::SchedulerError;
