//! The per-run pipeline: selection, summarization, overview

pub mod handler;
pub mod overview;
pub mod select;
pub mod summarize;

// Re-export the main entry point for convenience
pub use handler::{RunOutcome, RunReport, Services, run_digest};
