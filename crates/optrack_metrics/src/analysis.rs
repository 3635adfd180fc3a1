//! Analysis record and the pure computations behind it

use crate::catalog::SuggestionCatalog;
use serde::{Deserialize, Serialize};

pub const CACHING_HINT: &str = "Consider implementing caching for expensive operations";
pub const COMPLEXITY_HINT: &str = "Analyze algorithm complexity for potential improvements";

/// Result of analyzing one timed run of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Decrease relative to the previous run, in percent. Never negative.
    pub improvement_percentage: f64,
    /// Duration of the analyzed run (ms)
    pub execution_time: f64,
    /// Synthetic estimate, see `OptimizationTracker::estimate_memory_usage`
    pub memory_usage: usize,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// Execution times (ms) above which the slow-path hints are emitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowPathThresholds {
    pub caching_ms: f64,
    pub complexity_ms: f64,
}

impl Default for SlowPathThresholds {
    fn default() -> Self {
        Self {
            caching_ms: 1000.0,
            complexity_ms: 100.0,
        }
    }
}

/// Percentage decrease from `previous` to `current`, floored at 0.
///
/// Returns 0 when there is no previous sample or the previous sample is 0.
pub fn improvement_percentage(previous: Option<f64>, current: f64) -> f64 {
    match previous {
        Some(previous) if previous > 0.0 && previous.is_finite() => {
            let improvement = (previous - current) / previous * 100.0;
            improvement.max(0.0)
        }
        _ => 0.0,
    }
}

/// Slow-path hints first (caching, then complexity), then catalog entries.
pub(crate) fn generate_suggestions(
    catalog: &SuggestionCatalog,
    thresholds: &SlowPathThresholds,
    operation: &str,
    execution_time: f64,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if execution_time > thresholds.caching_ms {
        suggestions.push(CACHING_HINT.to_string());
    }
    if execution_time > thresholds.complexity_ms {
        suggestions.push(COMPLEXITY_HINT.to_string());
    }
    suggestions.extend(catalog.suggestions_for(operation).iter().cloned());

    suggestions
}
