//! Optimization tracker: times named operations and caches their analysis

use crate::analysis::{generate_suggestions, improvement_percentage, AnalysisResult, SlowPathThresholds};
use crate::catalog::SuggestionCatalog;
use crate::config::TrackerConfig;
use crate::summary::SummaryReport;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;

const TIMING_RECORD_BYTES: usize = 64;
const ANALYSIS_RECORD_BYTES: usize = 256;

/// Latest timing and latest analysis per operation name.
///
/// Single-caller by itself; wrap in [`crate::SharedTracker`] to share it
/// across threads.
#[derive(Debug, Clone)]
pub struct OptimizationTracker {
    timings: HashMap<String, f64>,
    reports: HashMap<String, AnalysisResult>,
    catalog: SuggestionCatalog,
    thresholds: SlowPathThresholds,
}

impl OptimizationTracker {
    pub fn new() -> Self {
        Self::with_catalog(SuggestionCatalog::builtin(), SlowPathThresholds::default())
    }

    pub fn with_config(config: &TrackerConfig) -> Self {
        Self::with_catalog(config.suggestion_catalog(), config.thresholds)
    }

    pub fn with_catalog(catalog: SuggestionCatalog, thresholds: SlowPathThresholds) -> Self {
        Self {
            timings: HashMap::new(),
            reports: HashMap::new(),
            catalog,
            thresholds,
        }
    }

    /// Run `f`, record its wall-clock duration under `name` and analyze it.
    ///
    /// Returns whatever `f` returns. If `f` panics nothing is recorded.
    pub fn run_timed<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.record_timing(name, elapsed_ms);
        result
    }

    /// Like [`run_timed`](Self::run_timed) for fallible operations.
    ///
    /// An `Err` is handed back untouched and leaves both maps as they were.
    pub fn try_run_timed<F, R, E>(&mut self, name: &str, f: F) -> Result<R, E>
    where
        F: FnOnce() -> Result<R, E>,
    {
        let start = Instant::now();
        let outcome = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(value) => {
                self.record_timing(name, elapsed_ms);
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(operation = name, elapsed_ms, "operation failed, not recorded");
                Err(err)
            }
        }
    }

    /// Store a measured duration (ms) for `name` and analyze it against the
    /// timing it replaces.
    pub fn record_timing(&mut self, name: &str, execution_time: f64) -> &AnalysisResult {
        if name.is_empty() {
            tracing::warn!("recording timing under an empty operation name");
        }

        let previous = self.timings.insert(name.to_string(), execution_time);
        let result = self.analyze_against(name, execution_time, previous);
        tracing::debug!(
            operation = name,
            execution_time,
            improvement = result.improvement_percentage,
            "recorded timing"
        );
        result
    }

    /// Analyze a sample against the currently stored timing for `name`.
    ///
    /// Only the analysis cache is written; the timing map is left alone.
    pub fn analyze(&mut self, name: &str, execution_time: f64) -> &AnalysisResult {
        let previous = self.timings.get(name).copied();
        self.analyze_against(name, execution_time, previous)
    }

    fn analyze_against(
        &mut self,
        name: &str,
        execution_time: f64,
        previous: Option<f64>,
    ) -> &AnalysisResult {
        let result = AnalysisResult {
            improvement_percentage: improvement_percentage(previous, execution_time),
            execution_time,
            memory_usage: self.estimate_memory_usage(),
            suggestions: generate_suggestions(&self.catalog, &self.thresholds, name, execution_time),
        };
        tracing::trace!(operation = name, suggestions = result.suggestions.len(), "cached analysis");

        match self.reports.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(result);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(result),
        }
    }

    /// Synthetic figure: 64 per tracked timing plus 256 per cached analysis.
    pub fn estimate_memory_usage(&self) -> usize {
        self.timings.len() * TIMING_RECORD_BYTES + self.reports.len() * ANALYSIS_RECORD_BYTES
    }

    pub fn get_report(&self, name: &str) -> Option<&AnalysisResult> {
        self.reports.get(name)
    }

    pub fn generate_summary(&self) -> SummaryReport {
        let total_operations = self.timings.len();
        let average_execution_time = if total_operations == 0 {
            0.0
        } else {
            self.timings.values().sum::<f64>() / total_operations as f64
        };

        SummaryReport {
            total_operations,
            average_execution_time,
            optimization_opportunities: self
                .reports
                .values()
                .filter(|report| report.has_suggestions())
                .count(),
            memory_usage: self.estimate_memory_usage(),
        }
    }

    pub fn last_timing(&self, name: &str) -> Option<f64> {
        self.timings.get(name).copied()
    }

    pub fn timings(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.timings.iter()
    }

    pub fn reports(&self) -> impl Iterator<Item = (&String, &AnalysisResult)> {
        self.reports.iter()
    }

    pub fn catalog(&self) -> &SuggestionCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> SlowPathThresholds {
        self.thresholds
    }

    /// Forget all timings and analyses. The catalog is kept.
    pub fn reset(&mut self) {
        self.timings.clear();
        self.reports.clear();
    }
}

impl Default for OptimizationTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CACHING_HINT, COMPLEXITY_HINT};
    use std::panic::{self, AssertUnwindSafe};
    use std::time::Duration;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Frame {
        id: u32,
        label: String,
        samples: Vec<f32>,
    }

    #[test]
    fn first_analysis_has_no_improvement() {
        let mut tracker = OptimizationTracker::new();
        let report = tracker.analyze("never_run", 12.0);

        assert_eq!(report.improvement_percentage, 0.0);
        assert_eq!(report.execution_time, 12.0);
        assert_eq!(tracker.last_timing("never_run"), None);
    }

    #[test]
    fn second_run_improvement_is_relative_to_first() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("parse", 200.0);
        let report = tracker.record_timing("parse", 50.0);

        assert!(approx_eq(report.improvement_percentage, 75.0));
        assert_eq!(tracker.last_timing("parse"), Some(50.0));
    }

    #[test]
    fn slower_second_run_clamps_to_zero() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("parse", 10.0);
        let report = tracker.record_timing("parse", 30.0);

        assert_eq!(report.improvement_percentage, 0.0);
    }

    #[test]
    fn zero_first_run_gives_zero_improvement() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("noop", 0.0);
        let report = tracker.record_timing("noop", 3.0);

        assert_eq!(report.improvement_percentage, 0.0);
        assert!(!report.improvement_percentage.is_nan());
    }

    #[test]
    fn standalone_analyze_compares_against_stored_timing() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("query", 40.0);
        let report = tracker.analyze("query", 10.0);

        assert!(approx_eq(report.improvement_percentage, 75.0));
        assert_eq!(tracker.last_timing("query"), Some(40.0));
    }

    #[test]
    fn slow_rendering_run_lists_hints_then_catalog() {
        let mut tracker = OptimizationTracker::new();
        let report = tracker.record_timing("rendering", 1500.0);

        assert_eq!(
            report.suggestions,
            [
                CACHING_HINT,
                COMPLEXITY_HINT,
                "Use virtual DOM",
                "Implement component memoization",
            ]
        );
    }

    #[test]
    fn fast_unknown_operation_has_no_suggestions() {
        let mut tracker = OptimizationTracker::new();
        let report = tracker.record_timing("checksum", 50.0);

        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn fresh_summary_is_all_zero() {
        let tracker = OptimizationTracker::new();
        assert_eq!(tracker.generate_summary(), SummaryReport::default());
    }

    #[test]
    fn summary_averages_latest_timings() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("a", 10.0);
        tracker.record_timing("b", 30.0);

        let summary = tracker.generate_summary();
        assert_eq!(summary.total_operations, 2);
        assert!(approx_eq(summary.average_execution_time, 20.0));
        assert_eq!(summary.optimization_opportunities, 0);

        // Only the latest timing of "a" counts
        tracker.record_timing("a", 50.0);
        assert!(approx_eq(tracker.generate_summary().average_execution_time, 40.0));
    }

    #[test]
    fn summary_counts_reports_with_suggestions() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("checksum", 5.0);
        tracker.record_timing("network_requests", 5.0);
        tracker.record_timing("slow_job", 250.0);

        assert_eq!(tracker.generate_summary().optimization_opportunities, 2);
    }

    #[test]
    fn memory_estimate_is_320_per_analyzed_name() {
        let mut tracker = OptimizationTracker::new();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            tracker.record_timing(name, i as f64);
        }
        tracker.record_timing("a", 1.0);

        assert_eq!(tracker.estimate_memory_usage(), 4 * 320);
        assert_eq!(tracker.generate_summary().memory_usage, 4 * 320);
    }

    #[test]
    fn report_memory_is_taken_before_caching() {
        let mut tracker = OptimizationTracker::new();
        assert_eq!(tracker.record_timing("a", 1.0).memory_usage, 64);
        assert_eq!(tracker.record_timing("b", 1.0).memory_usage, 2 * 64 + 256);
    }

    #[test]
    fn get_report_for_unknown_name_is_none() {
        let tracker = OptimizationTracker::new();
        assert!(tracker.get_report("missing").is_none());
    }

    #[test]
    fn later_run_overwrites_report() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("rendering", 1500.0);
        tracker.record_timing("rendering", 10.0);

        let report = tracker.get_report("rendering").unwrap();
        assert_eq!(report.execution_time, 10.0);
        assert_eq!(report.suggestions.len(), 2);
    }

    #[test]
    fn run_timed_returns_plain_value_unchanged() {
        let mut tracker = OptimizationTracker::new();
        let value = tracker.run_timed("answer", || 42_u64);

        assert_eq!(value, 42);
        assert!(tracker.last_timing("answer").is_some());
        assert!(tracker.get_report("answer").is_some());
    }

    #[test]
    fn run_timed_returns_structured_value_unchanged() {
        let mut tracker = OptimizationTracker::new();
        let expected = Frame {
            id: 7,
            label: "shadow pass".to_string(),
            samples: vec![0.5, 1.5],
        };

        let frame = tracker.run_timed("rendering", || expected.clone());
        assert_eq!(frame, expected);
    }

    #[test]
    fn run_timed_measures_wall_clock_milliseconds() {
        let mut tracker = OptimizationTracker::new();
        tracker.run_timed("sleepy", || std::thread::sleep(Duration::from_millis(5)));

        let elapsed = tracker.last_timing("sleepy").unwrap();
        assert!(elapsed >= 5.0, "expected at least 5ms, got {elapsed}");
        assert_eq!(tracker.get_report("sleepy").unwrap().execution_time, elapsed);
    }

    #[test]
    fn failed_operation_leaves_state_untouched() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("load", 20.0);
        let before = tracker.get_report("load").cloned();

        let outcome: Result<(), String> =
            tracker.try_run_timed("load", || Err("disk on fire".to_string()));

        assert_eq!(outcome, Err("disk on fire".to_string()));
        assert_eq!(tracker.last_timing("load"), Some(20.0));
        assert_eq!(tracker.get_report("load").cloned(), before);
    }

    #[test]
    fn failed_first_run_records_nothing() {
        let mut tracker = OptimizationTracker::new();
        let outcome: Result<u8, &str> = tracker.try_run_timed("load", || Err("nope"));

        assert!(outcome.is_err());
        assert_eq!(tracker.generate_summary(), SummaryReport::default());
    }

    #[test]
    fn successful_try_run_is_recorded() {
        let mut tracker = OptimizationTracker::new();
        let outcome: Result<&str, ()> = tracker.try_run_timed("load", || Ok("done"));

        assert_eq!(outcome, Ok("done"));
        assert!(tracker.get_report("load").is_some());
    }

    #[test]
    fn panicking_operation_records_nothing() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("explode", 8.0);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            tracker.run_timed("explode", || -> u32 { panic!("boom") })
        }));

        assert!(outcome.is_err());
        assert_eq!(tracker.last_timing("explode"), Some(8.0));
        assert_eq!(tracker.get_report("explode").unwrap().execution_time, 8.0);
    }

    #[test]
    fn custom_config_drives_suggestions() {
        let config = TrackerConfig::from_json_str(
            r#"{ "thresholds": { "caching_ms": 20.0, "complexity_ms": 10.0 },
                 "catalog": { "io": ["Buffer writes"] } }"#,
        )
        .unwrap();
        let mut tracker = OptimizationTracker::with_config(&config);

        let report = tracker.record_timing("io", 25.0);
        assert_eq!(report.suggestions, [CACHING_HINT, COMPLEXITY_HINT, "Buffer writes"]);
    }

    #[test]
    fn reset_clears_history_but_keeps_catalog() {
        let mut tracker = OptimizationTracker::new();
        tracker.record_timing("rendering", 5.0);
        tracker.reset();

        assert_eq!(tracker.generate_summary(), SummaryReport::default());
        assert_eq!(tracker.timings().count(), 0);
        assert_eq!(tracker.reports().count(), 0);
        assert_eq!(tracker.catalog().len(), 3);

        let report = tracker.record_timing("rendering", 5.0);
        assert_eq!(report.improvement_percentage, 0.0);
        assert_eq!(report.suggestions.len(), 2);
    }
}
