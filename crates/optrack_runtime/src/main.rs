//! Optrack Runtime
//!
//! Small driver that times a few sample workloads and prints the resulting
//! per-operation reports and summary as JSON.
//!
//! Usage: `optrack [config.json]`

use anyhow::{Context, Result};
use optrack_metrics::{track, OptimizationTracker, TrackerConfig};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Optrack v{}", optrack_metrics::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => TrackerConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => TrackerConfig::default(),
    };
    let mut tracker = OptimizationTracker::with_config(&config);
    tracing::info!(categories = tracker.catalog().len(), "tracker ready");

    run_workloads(&mut tracker);

    let reports: BTreeMap<_, _> = tracker.reports().collect();
    println!("{}", serde_json::to_string_pretty(&reports)?);

    let summary = tracker.generate_summary();
    tracing::info!("{summary}");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn run_workloads(tracker: &mut OptimizationTracker) {
    let samples: Vec<u64> = (0..200_000).collect();

    let checksum = track!(tracker, "data_processing", {
        samples.iter().map(|v| v.wrapping_mul(*v)).fold(0u64, u64::wrapping_add)
    });
    tracing::info!(checksum, "data_processing done");

    let frame = track!(tracker, "rendering", {
        (0..48)
            .map(|row| (0..64).map(|col| if (row + col) % 7 == 0 { '#' } else { '.' }).collect::<String>())
            .collect::<Vec<_>>()
    });
    tracing::info!(rows = frame.len(), "rendering done");

    track!(tracker, "network_requests", {
        std::thread::sleep(Duration::from_millis(120));
    });

    // Second pass over a smaller slice to show an improvement figure
    let checksum = track!(tracker, "data_processing", {
        samples[..20_000].iter().map(|v| v.wrapping_mul(*v)).fold(0u64, u64::wrapping_add)
    });
    tracing::info!(checksum, "data_processing rerun done");
    if let Some(report) = tracker.get_report("data_processing") {
        tracing::info!(
            improvement = report.improvement_percentage,
            "data_processing improvement (%)"
        );
    }

    let parsed = tracker.try_run_timed("config_reload", || {
        TrackerConfig::from_json_str(r#"{ "thresholds": { "caching_ms": "soon" } }"#)
    });
    if let Err(err) = parsed {
        tracing::warn!(%err, "config_reload failed, not recorded");
    }
}
