//! Thread-safe handle around a single tracker

use crate::analysis::AnalysisResult;
use crate::config::TrackerConfig;
use crate::summary::SummaryReport;
use crate::tracker::OptimizationTracker;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

/// Cloneable handle sharing one [`OptimizationTracker`].
///
/// Both maps sit behind one lock. The wrapped operation runs without the
/// lock held; storing its timing and analyzing it happen under a single
/// acquisition, so the previous timing read is atomic with the write.
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<OptimizationTracker>>,
}

impl SharedTracker {
    pub fn new() -> Self {
        Self::from_tracker(OptimizationTracker::new())
    }

    pub fn with_config(config: &TrackerConfig) -> Self {
        Self::from_tracker(OptimizationTracker::with_config(config))
    }

    pub fn from_tracker(tracker: OptimizationTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn run_timed<F, R>(&self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.inner.lock().record_timing(name, elapsed_ms);
        result
    }

    pub fn try_run_timed<F, R, E>(&self, name: &str, f: F) -> Result<R, E>
    where
        F: FnOnce() -> Result<R, E>,
    {
        let start = Instant::now();
        let value = f()?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.inner.lock().record_timing(name, elapsed_ms);
        Ok(value)
    }

    pub fn record_timing(&self, name: &str, execution_time: f64) -> AnalysisResult {
        self.inner.lock().record_timing(name, execution_time).clone()
    }

    pub fn get_report(&self, name: &str) -> Option<AnalysisResult> {
        self.inner.lock().get_report(name).cloned()
    }

    pub fn generate_summary(&self) -> SummaryReport {
        self.inner.lock().generate_summary()
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.inner.lock().estimate_memory_usage()
    }

    /// Run `f` with the lock held for its whole duration.
    pub fn with_tracker<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OptimizationTracker) -> R,
    {
        f(&mut *self.inner.lock())
    }
}
