//! Optrack Metrics - per-operation timing and optimization hints
//!
//! Times named operations, keeps the latest duration for each name, and
//! derives a small analysis record (improvement over the previous run,
//! a synthetic memory estimate, canned suggestions) after every run.
//!
//! # Usage
//!
//! ```ignore
//! use optrack_metrics::OptimizationTracker;
//!
//! let mut tracker = OptimizationTracker::new();
//! let sum: u64 = tracker.run_timed("data_processing", || (0..1_000u64).sum());
//! let report = tracker.get_report("data_processing").unwrap();
//! println!("{:.3}ms, {} hints", report.execution_time, report.suggestions.len());
//! println!("{}", tracker.generate_summary());
//! ```
//!
//! Times are fractional milliseconds everywhere; the slow-path thresholds
//! (100ms, 1000ms) are expressed in that unit.

mod analysis;
mod catalog;
mod config;
mod error;
mod shared;
mod summary;
mod tracker;

pub use analysis::{improvement_percentage, AnalysisResult, SlowPathThresholds};
pub use catalog::SuggestionCatalog;
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use shared::SharedTracker;
pub use summary::SummaryReport;
pub use tracker::OptimizationTracker;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Macros
// ============================================================================

/// Time a block under an operation name and return the block's value
///
/// Works with both `OptimizationTracker` (needs `&mut`) and `SharedTracker`.
#[macro_export]
macro_rules! track {
    ($tracker:expr, $name:expr, $body:block) => {
        $tracker.run_timed($name, || $body)
    };
}
