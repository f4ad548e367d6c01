//! Context Budget Allocator (C6, §4.6).
//!
//! Computes the depth-based token budget a child feature gets, estimates
//! token counts with the conservative chars-per-token ratio, and builds the
//! Markdown prompt handed to a child worker by prioritizing and truncating
//! parent-context sections to fit.

pub mod budget;
pub mod estimate;
pub mod prompt;

pub use budget::MIN_CONTEXT_BUDGET;
pub use budget::budget_for_depth;
pub use budget::is_over_budget;
pub use budget::needs_summarization;
pub use estimate::estimate_tokens;
pub use prompt::ChildPromptInput;
pub use prompt::build_child_prompt;
