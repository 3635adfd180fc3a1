use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a tracker from configuration.
///
/// Timing and analysis never fail; only loading configuration does.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to read config '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("threshold '{name}' must be a finite, non-negative number of milliseconds (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
