//! Configuration type definitions.

use crate::constants::{DEFAULT_DEST_DIR, DEFAULT_LOC_DIR};
use crate::dataset::{DatasetPlan, Thresholds};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mask thresholds.
    pub thresholds: Thresholds,

    /// Default source and destination roots.
    pub paths: PathsConfig,

    /// Output settings.
    pub output: OutputConfig,

    /// Default dataset plan.
    pub plan: DatasetPlan,
}

/// Default source and destination roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where generated data is written.
    pub dest: PathBuf,

    /// Where the simulation dataset directories live.
    pub loc: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dest: PathBuf::from(DEFAULT_DEST_DIR),
            loc: PathBuf::from(DEFAULT_LOC_DIR),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show progress bars while copying.
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { progress: true }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.thresholds.curl, 0.49);
        assert_eq!(config.thresholds.velocity, 18.0);
        assert_eq!(config.paths.dest, PathBuf::from("data"));
        assert_eq!(config.paths.loc, PathBuf::from("datasets"));
        assert!(config.output.progress);
        assert!(config.plan.is_empty());
    }

    #[test]
    fn test_partial_thresholds_keep_defaults() {
        let config: Config = toml::from_str("[thresholds]\nvelocity = 12.5\n").unwrap_or_default();
        assert_eq!(config.thresholds.velocity, 12.5);
        assert_eq!(config.thresholds.curl, 0.49);
    }
}
