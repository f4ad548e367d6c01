//! Token/Cost Accumulator (C2, §4.2).
//!
//! A cheaply-cloned, reader-writer-locked counter of a feature's token and
//! cost totals. Every field update is applied atomically across all five
//! counters under a single write-lock acquisition, matching §5's
//! shared-state tier ("Accumulator: any worker thread may write via
//! `Update`; readers see a consistent snapshot").

use std::sync::Arc;
use std::sync::RwLock;

use conductor_protocol::token_usage::TierRates;
use conductor_protocol::token_usage::TokenUsage;

/// Shared, lock-guarded token/cost counter for a single feature.
///
/// Cloning an `Accumulator` shares the same underlying counter (it holds an
/// `Arc`), so the Worker Process Manager's reader tasks and the scheduler
/// can each hold a handle without needing to route updates through a
/// channel.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    inner: Arc<RwLock<TokenUsage>>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Additively updates all five counters in one write-lock acquisition
    /// (§4.2 "`Update` must be atomic across all five fields").
    pub fn update(&self, input: i64, output: i64, cache_read: i64, cache_write: i64, cost_usd: f64) {
        let mut guard = self.inner.write().expect("accumulator lock poisoned");
        guard.update(input, output, cache_read, cache_write, cost_usd);
    }

    /// Folds another accumulator's current totals into this one (used for
    /// tree aggregation, §4.2 `Add`).
    pub fn add(&self, other: &Accumulator) {
        let addend = other.snapshot();
        let mut guard = self.inner.write().expect("accumulator lock poisoned");
        guard.add(&addend);
    }

    /// Folds a raw `TokenUsage` delta into this accumulator.
    pub fn add_usage(&self, usage: &TokenUsage) {
        let mut guard = self.inner.write().expect("accumulator lock poisoned");
        guard.add(usage);
    }

    /// A value-copy of the current totals (§4.2 "Snapshots return
    /// value-copies").
    pub fn snapshot(&self) -> TokenUsage {
        *self.inner.read().expect("accumulator lock poisoned")
    }

    /// `input + output` for the current totals.
    pub fn total(&self) -> i64 {
        self.snapshot().total()
    }

    /// Derived cost estimate from a per-tier rate table, independent of any
    /// cost actually reported by the worker (§4.2).
    pub fn estimated_cost(&self, rates: TierRates) -> f64 {
        self.snapshot().estimate_cost(rates)
    }
}

/// Post-order sum of a set of accumulators (used by the Recursive Feature
/// Tree's `TotalTokenUsage`, §4.7).
pub fn aggregate<'a>(accumulators: impl IntoIterator<Item = &'a Accumulator>) -> TokenUsage {
    let mut total = TokenUsage::new();
    for accumulator in accumulators {
        total.add(&accumulator.snapshot());
    }
    total
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
