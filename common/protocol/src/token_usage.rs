//! Token usage counters, shared by the accumulator and the progress
//! snapshot.

use serde::Deserialize;
use serde::Serialize;

/// Token usage for a single request/response or an aggregated total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: i64,
    #[serde(default)]
    pub output_tokens: i64,
    #[serde(default)]
    pub cache_read_tokens: i64,
    #[serde(default)]
    pub cache_write_tokens: i64,
    /// Accumulated USD cost, carried only when explicitly reported by the
    /// worker (see §4.2 — derived cost estimation is a separate operation).
    #[serde(default)]
    pub cost_usd: f64,
}

impl TokenUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// `input + output`, per §4.2. Cache tokens are tracked separately and
    /// intentionally excluded from the total.
    pub fn total(&self) -> i64 {
        self.input_tokens + self.output_tokens
    }

    /// Additive merge of all five fields, used for per-feature updates and
    /// tree aggregation alike.
    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.cache_read_tokens += other.cache_read_tokens;
        self.cache_write_tokens += other.cache_write_tokens;
        self.cost_usd += other.cost_usd;
    }

    pub fn update(
        &mut self,
        input: i64,
        output: i64,
        cache_read: i64,
        cache_write: i64,
        cost_usd: f64,
    ) {
        self.input_tokens += input;
        self.output_tokens += output;
        self.cache_read_tokens += cache_read;
        self.cache_write_tokens += cache_write;
        self.cost_usd += cost_usd;
    }
}

/// Per-million-token pricing for a model tier, used by
/// [`TokenUsage::estimate_cost`].
#[derive(Debug, Clone, Copy)]
pub struct TierRates {
    pub input_per_million: f64,
    pub output_per_million: f64,
    pub cache_per_million: f64,
}

impl TokenUsage {
    /// Derived cost estimate from a per-tier rate table, independent of any
    /// cost actually reported by the worker (§4.2).
    pub fn estimate_cost(&self, rates: TierRates) -> f64 {
        let input_cost = self.input_tokens as f64 / 1_000_000.0 * rates.input_per_million;
        let output_cost = self.output_tokens as f64 / 1_000_000.0 * rates.output_per_million;
        let cache_cost = (self.cache_read_tokens + self.cache_write_tokens) as f64
            / 1_000_000.0
            * rates.cache_per_million;
        input_cost + output_cost + cache_cost
    }
}

#[cfg(test)]
#[path = "token_usage.test.rs"]
mod tests;
