//! Tracker configuration

use crate::analysis::SlowPathThresholds;
use crate::catalog::SuggestionCatalog;
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Tracker settings, loadable from JSON
///
/// ```json
/// {
///   "thresholds": { "caching_ms": 1000.0, "complexity_ms": 100.0 },
///   "catalog": { "rendering": ["Use virtual DOM"] }
/// }
/// ```
///
/// Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub thresholds: SlowPathThresholds,
    pub catalog: BTreeMap<String, Vec<String>>,
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TrackerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded tracker config");
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("caching_ms", self.thresholds.caching_ms),
            ("complexity_ms", self.thresholds.complexity_ms),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(TrackerError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }

    pub fn suggestion_catalog(&self) -> SuggestionCatalog {
        SuggestionCatalog::from_entries(
            self.catalog
                .iter()
                .map(|(category, hints)| (category.as_str(), hints.iter().map(String::as_str))),
        )
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let builtin = SuggestionCatalog::builtin();
        let catalog = builtin
            .categories()
            .map(|category| (category.to_string(), builtin.suggestions_for(category).to_vec()))
            .collect();

        Self {
            thresholds: SlowPathThresholds::default(),
            catalog,
        }
    }
}
