//! Auto Model Selector (C4, §4.4).
//!
//! Per-feature state machine choosing one of three model tiers
//! (cheap/mid/premium), escalating or deescalating in response to parsed
//! `StreamEvent`s. Holds a write-locked decision state so the Worker
//! Process Manager's reader tasks and the scheduler can share one handle
//! (§5 "Selector: write-locked around each event decision; read-locked for
//! `CurrentModel()`").

pub mod patterns;

use std::sync::Arc;
use std::sync::RwLock;

use chrono::DateTime;
use chrono::Utc;
use conductor_protocol::feature::ModelSwitch;
use conductor_protocol::feature::ModelSwitchReason;
use conductor_protocol::feature::ModelTier;
use conductor_protocol::stream_event::StreamEvent;

/// Configuration for a [`Selector`] (§4.4).
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Consecutive tool-errors before an escalation from cheap to mid.
    pub error_threshold: u32,
    /// Keywords that count toward the generic "explicit escalation"
    /// keyword-match rule.
    pub escalation_keywords: Vec<String>,
    /// Keywords that count toward the generic deescalation keyword-match
    /// rule.
    pub deescalation_keywords: Vec<String>,
    /// Master on/off switch; when `false`, `handle_event` is a no-op.
    pub enabled: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            error_threshold: 2,
            escalation_keywords: vec![
                "complex".to_string(),
                "complicated".to_string(),
                "difficult".to_string(),
                "tricky".to_string(),
            ],
            deescalation_keywords: vec![
                "simple".to_string(),
                "trivial".to_string(),
                "straightforward".to_string(),
                "easy".to_string(),
            ],
            enabled: true,
        }
    }
}

struct State {
    current: ModelTier,
    switches: Vec<ModelSwitch>,
    error_count: u32,
    test_failure_count: u32,
}

/// Shared, lock-guarded auto model selector for a single feature.
#[derive(Clone)]
pub struct Selector {
    config: SelectorConfig,
    state: Arc<RwLock<State>>,
}

impl Selector {
    /// Starts a selector at `initial`, recording the mandatory first
    /// `initial` switch whose from-model is `None` (§3, §8).
    pub fn new(initial: ModelTier, config: SelectorConfig) -> Self {
        let switch = ModelSwitch {
            timestamp: Utc::now(),
            from_model: None,
            to_model: initial,
            reason: ModelSwitchReason::Initial,
            detail: String::new(),
        };
        Self {
            config,
            state: Arc::new(RwLock::new(State {
                current: initial,
                switches: vec![switch],
                error_count: 0,
                test_failure_count: 0,
            })),
        }
    }

    pub fn current_model(&self) -> ModelTier {
        self.state.read().expect("selector lock poisoned").current
    }

    /// A value-copy of the append-only switch log, in order (the audit
    /// trail, §4.4).
    pub fn switches(&self) -> Vec<ModelSwitch> {
        self.state.read().expect("selector lock poisoned").switches.clone()
    }

    /// Processes one parsed `StreamEvent`, applying at most one switch
    /// (§4.4 items 1-3). Holds the write lock across the whole decision.
    pub fn handle_event(&self, event: &StreamEvent) {
        if !self.config.enabled {
            return;
        }
        let mut state = self.state.write().expect("selector lock poisoned");
        match event {
            StreamEvent::ToolResult { text, is_error: true, .. } => {
                self.on_tool_error(&mut state, text);
            }
            StreamEvent::ToolResult { text, is_error: false, full_len } => {
                self.on_tool_success(&mut state, text, *full_len);
            }
            StreamEvent::Assistant { text, .. } => {
                self.on_assistant_text(&mut state, text);
            }
            _ => {}
        }
    }

    /// Unconditionally sets the tier, appending an `explicit_request`
    /// switch unless `target` equals the current tier (§4.4 item 4, §8
    /// "a force to the same tier is a no-op").
    pub fn force_model(&self, target: ModelTier, detail: impl Into<String>) {
        let mut state = self.state.write().expect("selector lock poisoned");
        if state.current == target {
            return;
        }
        self.push_switch(&mut state, target, ModelSwitchReason::ExplicitRequest, detail.into());
    }

    fn on_tool_error(&self, state: &mut State, text: &str) {
        state.error_count += 1;
        tracing::debug!(error_count = state.error_count, "tool error observed");

        if state.error_count >= self.config.error_threshold && state.current == ModelTier::Cheap {
            self.push_switch(
                state,
                ModelTier::Mid,
                ModelSwitchReason::MultipleErrors,
                "error threshold reached".to_string(),
            );
        }

        if patterns::is_build_or_test_failure(text) {
            state.test_failure_count += 1;
            if state.test_failure_count >= self.config.error_threshold {
                let target = state.current.escalate();
                if target != state.current {
                    self.push_switch(
                        state,
                        target,
                        ModelSwitchReason::TestFailure,
                        "repeated build/test failures".to_string(),
                    );
                }
            }
        }
    }

    fn on_tool_success(&self, state: &mut State, text: &str, full_len: usize) {
        if patterns::is_architectural(text) {
            if state.current == ModelTier::Cheap {
                self.push_switch(
                    state,
                    ModelTier::Mid,
                    ModelSwitchReason::Architectural,
                    "architectural content detected".to_string(),
                );
            } else if state.current == ModelTier::Mid && full_len > 5000 {
                self.push_switch(
                    state,
                    ModelTier::Premium,
                    ModelSwitchReason::Architectural,
                    "long architectural content at mid tier".to_string(),
                );
            }
        }

        if patterns::is_debugging(text) && state.current == ModelTier::Cheap {
            self.push_switch(
                state,
                ModelTier::Mid,
                ModelSwitchReason::Debugging,
                "debugging signal detected".to_string(),
            );
        }

        // Complex-debugging escalation from mid to premium is only checked
        // once mid-tier has already been entered (§9 open question,
        // fixed).
        if state.current == ModelTier::Mid && patterns::is_complex_debugging(text) {
            self.push_switch(
                state,
                ModelTier::Premium,
                ModelSwitchReason::Debugging,
                "complex debugging signal detected".to_string(),
            );
        }
    }

    fn on_assistant_text(&self, state: &mut State, text: &str) {
        // Arbitration order fixed by §9: explicit request, then keyword
        // escalation, then keyword deescalation.
        if let Some(target) = patterns::explicit_tier_request(text) {
            if target > state.current {
                self.push_switch(state, target, ModelSwitchReason::ExplicitRequest, "explicit model request".to_string());
            } else if target < state.current && state.error_count == 0 {
                self.push_switch(state, target, ModelSwitchReason::Deescalate, "explicit model request".to_string());
            }
            return;
        }

        let escalation_hits = patterns::count_keyword_matches(text, &self.config.escalation_keywords);
        if escalation_hits >= 2 || patterns::is_architectural(text) {
            let target = state.current.escalate();
            if target != state.current {
                self.push_switch(
                    state,
                    target,
                    ModelSwitchReason::ComplexityDetected,
                    "escalation keywords matched".to_string(),
                );
                return;
            }
        }

        let deescalation_hits = patterns::count_keyword_matches(text, &self.config.deescalation_keywords);
        if deescalation_hits >= 2 && state.error_count == 0 && state.current != ModelTier::Cheap {
            let target = state.current.deescalate();
            self.push_switch(
                state,
                target,
                ModelSwitchReason::Deescalate,
                "deescalation keywords matched".to_string(),
            );
        }
    }

    fn push_switch(&self, state: &mut State, target: ModelTier, reason: ModelSwitchReason, detail: String) {
        if target == state.current {
            return;
        }
        let from = state.current;
        state.current = target;
        tracing::info!(?from, to = ?target, ?reason, "model tier switch");
        state.switches.push(ModelSwitch {
            timestamp: Utc::now(),
            from_model: Some(from),
            to_model: target,
            reason,
            detail,
        });
    }
}

/// Timestamp helper so tests can assert ordering without depending on
/// wall-clock time directly.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
