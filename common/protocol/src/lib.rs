//! Shared wire/persisted data model (§3) for the feature-fleet orchestrator.
//!
//! Every type here derives `Serialize`/`Deserialize` so it can cross the
//! process boundary (worker stdout) or the durable-storage boundary
//! (progress snapshot) without a bespoke encoding layer.

pub mod failure;
pub mod feature;
pub mod ids;
pub mod snapshot;
pub mod spawn;
pub mod stream_event;
pub mod token_usage;
