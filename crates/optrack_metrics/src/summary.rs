//! Aggregate view across all tracked operations

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_operations: usize,
    /// Mean of each operation's latest timing (ms), 0 when nothing is tracked
    pub average_execution_time: f64,
    /// Cached analyses carrying at least one suggestion
    pub optimization_opportunities: usize,
    pub memory_usage: usize,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} operations, avg {:.3}ms, {} with suggestions, ~{} bytes",
            self.total_operations,
            self.average_execution_time,
            self.optimization_opportunities,
            self.memory_usage
        )
    }
}
