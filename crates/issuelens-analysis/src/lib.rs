//! Issue analysis: token-bounded chunking, issue-to-text formatting, and the
//! two-level chunk/combine procedure over an LLM backend.

mod chunk;
mod engine;
mod format;

pub use chunk::{chunk_issues, TOKENS_PER_ISSUE};
pub use engine::{analyze_issues, COMPLETION_MAX_TOKENS, SYSTEM_PROMPT};
pub use format::{format_issues, BODY_PREVIEW_CHARS, NO_ISSUES_SENTINEL};
