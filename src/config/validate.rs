//! Configuration validation.

use crate::config::Config;
use crate::constants::channel::{MAX_CURL_MAGNITUDE, MAX_VELOCITY_MAGNITUDE};
use crate::dataset::plan::validate_dataset_name;
use crate::dataset::{DatasetPlan, Thresholds};
use crate::error::{Error, Result};
use tracing::warn;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_thresholds(&config.thresholds)?;
    validate_plan(&config.plan)?;
    Ok(())
}

/// Validate mask thresholds.
///
/// Negative or non-finite values are rejected. Thresholds above what the
/// 8-bit encoding can represent are accepted with a warning, since every
/// mask will come out empty.
pub fn validate_thresholds(thresholds: &Thresholds) -> Result<()> {
    for (name, value) in [
        ("curl threshold", thresholds.curl),
        ("velocity threshold", thresholds.velocity),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::ConfigValidation {
                message: format!("{name} must be a non-negative number, got {value}"),
            });
        }
    }

    if thresholds.curl > MAX_CURL_MAGNITUDE {
        warn!(
            "curl threshold {} exceeds the largest encodable curl magnitude {}; masks will be empty",
            thresholds.curl, MAX_CURL_MAGNITUDE
        );
    }

    if thresholds.velocity > MAX_VELOCITY_MAGNITUDE {
        warn!(
            "velocity threshold {} exceeds the largest encodable velocity magnitude {:.2}; masks will be empty",
            thresholds.velocity, MAX_VELOCITY_MAGNITUDE
        );
    }

    Ok(())
}

/// Validate dataset names in a plan.
pub fn validate_plan(plan: &DatasetPlan) -> Result<()> {
    for (segment, sources) in plan.segments() {
        for source in sources {
            validate_dataset_name(&source.dataset).map_err(|message| Error::ConfigValidation {
                message: format!("{segment}: {message}"),
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CountSpec, SourceSpec};

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_negative_curl() {
        let mut config = Config::default();
        config.thresholds.curl = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_nan_velocity() {
        let mut config = Config::default();
        config.thresholds.velocity = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unreachable_threshold_is_allowed() {
        let mut config = Config::default();
        config.thresholds.curl = 0.9;
        config.thresholds.velocity = 100.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_bad_dataset_name() {
        let mut config = Config::default();
        config.plan.train = vec![SourceSpec::new("../escape", CountSpec::All)];
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }
}
