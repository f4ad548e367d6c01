//! Budget Governor (C5, §4.5).
//!
//! Tracks per-feature and global token/cost budgets, producing edge-
//! triggered threshold/overflow signals the scheduler consumes, and parses
//! the budget syntax that appears in PRD metadata (§6).

pub mod error;
pub mod parse;

pub use error::BudgetError;
pub use parse::BudgetParseError;
pub use parse::BudgetValue;
pub use parse::parse_budget;

/// Utilization at or above which a budget is "at threshold" (§4.5).
const THRESHOLD_RATIO: f64 = 0.9;

/// Result of checking usage against a budget (§4.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetCheck {
    pub percent: f64,
    pub at_threshold: bool,
    pub over_budget: bool,
}

/// Checks `used` against `budget` on either axis (tokens or USD — the
/// formula is the same). `budget <= 0` is always reported over-budget
/// (parsing rejects non-positive budgets, so this only bites a caller who
/// bypassed parsing).
pub fn check_budget(used: f64, budget: f64) -> BudgetCheck {
    if budget <= 0.0 {
        return BudgetCheck {
            percent: f64::INFINITY,
            at_threshold: true,
            over_budget: true,
        };
    }
    let percent = used / budget;
    BudgetCheck {
        percent,
        at_threshold: percent >= THRESHOLD_RATIO,
        // Strict: exactly 100% is not over, 100.001% is (§8).
        over_budget: percent > 1.0,
    }
}

/// Edge-triggered signal emitted the moment a budget crosses a boundary
/// (§4.5 "Threshold and overflow are edge-triggered signals").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSignal {
    ThresholdReached,
    OverBudget,
}

/// Per-feature or global budget tracker, remembering whether it has already
/// fired each edge so repeated checks at the same utilization don't
/// re-signal (§4.5, §5 "edge-triggered").
#[derive(Debug, Clone, Default)]
pub struct BudgetTracker {
    threshold_fired: bool,
    over_fired: bool,
    /// Set once a feature's usage has crossed over-budget; the scheduler
    /// consults this to flag the worker `budget_paused` (§4.5).
    paused: bool,
    /// Set once the global budget is at/over threshold; further worker
    /// starts are gated until explicit acknowledgement (§4.5).
    needs_acknowledgement: bool,
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn needs_acknowledgement(&self) -> bool {
        self.needs_acknowledgement
    }

    /// Explicit acknowledgement of a prior threshold/overflow signal,
    /// unblocking further starts (§4.5).
    pub fn acknowledge(&mut self) {
        self.needs_acknowledgement = false;
    }

    /// Feeds a fresh usage observation, returning any newly-crossed signal
    /// (`None` if nothing new crossed since the last check).
    pub fn check(&mut self, used: f64, budget: f64) -> (BudgetCheck, Option<BudgetSignal>) {
        let check = check_budget(used, budget);
        let mut signal = None;

        if check.over_budget && !self.over_fired {
            self.over_fired = true;
            self.threshold_fired = true;
            self.paused = true;
            self.needs_acknowledgement = true;
            signal = Some(BudgetSignal::OverBudget);
            tracing::warn!(percent = check.percent, "budget exceeded");
        } else if check.at_threshold && !self.threshold_fired {
            self.threshold_fired = true;
            self.needs_acknowledgement = true;
            signal = Some(BudgetSignal::ThresholdReached);
            tracing::warn!(percent = check.percent, "budget threshold reached");
        }

        (check, signal)
    }
}

/// Parses a budget string (§4.5, §6) and classifies the resulting error
/// through the shared status-code taxonomy.
pub fn parse_budget_checked(input: &str) -> Result<BudgetValue, BudgetError> {
    parse::parse_budget(input).map_err(BudgetError::from)
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
