//! Analysis configuration.
//!
//! A single enumerated-field value, constructed with [`Config::default`] and
//! optionally overridden field-by-field, then checked once with
//! [`Config::validate`]. No free-form mapping reaches the core — see
//! Design Note §9 in `SPEC_FULL.md`.

pub mod defaults;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Per-bin aggregation strategy (§3, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    Median,
    Mean,
    TrimmedMean,
}

impl Default for AggregationMethod {
    fn default() -> Self {
        Self::Median
    }
}

/// Binned-series smoothing strategy (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    Loess,
    Savgol,
    MovingAvg,
}

impl Default for SmoothingMethod {
    fn default() -> Self {
        Self::Loess
    }
}

/// Exercise-test protocol shape; overrides window-selection thresholds when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolType {
    Ramp,
    Step,
    Graded,
}

/// Full analysis configuration. Every field has a default, so any subset set
/// by the caller is legal; call [`Config::validate`] after building one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bin_size_w: f64,
    pub aggregation: AggregationMethod,
    pub loess_frac: f64,
    pub smoothing_method: SmoothingMethod,
    pub exclude_rest: bool,
    pub exclude_warmup: bool,
    pub exclude_recovery: bool,
    pub min_power_w: Option<f64>,
    pub trim_start_sec: Option<f64>,
    pub trim_end_sec: Option<f64>,
    pub vo2max_start_sec: Option<f64>,
    pub vo2max_end_sec: Option<f64>,
    pub fatmax_zone_threshold: f64,
    pub outlier_iqr_multiplier: f64,
    pub outlier_enabled: bool,
    pub min_bin_count: usize,
    pub adaptive_loess: bool,
    pub adaptive_polynomial: bool,
    pub protocol_type: Option<ProtocolType>,
    pub physiological_cap_enabled: bool,
    pub fat_cap: f64,
    pub cho_cap: f64,
    pub sliding_median_enabled: bool,
    pub sliding_median_window: usize,
    pub fatmax_bootstrap_enabled: bool,
    pub fatmax_bootstrap_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bin_size_w: defaults::BIN_SIZE_W_DEFAULT,
            aggregation: AggregationMethod::default(),
            loess_frac: defaults::LOESS_FRAC_DEFAULT,
            smoothing_method: SmoothingMethod::default(),
            exclude_rest: true,
            exclude_warmup: true,
            exclude_recovery: true,
            min_power_w: None,
            trim_start_sec: None,
            trim_end_sec: None,
            vo2max_start_sec: None,
            vo2max_end_sec: None,
            fatmax_zone_threshold: defaults::FATMAX_ZONE_THRESHOLD_DEFAULT,
            outlier_iqr_multiplier: defaults::OUTLIER_IQR_MULTIPLIER_DEFAULT,
            outlier_enabled: true,
            min_bin_count: defaults::MIN_BIN_COUNT_DEFAULT,
            adaptive_loess: true,
            adaptive_polynomial: true,
            protocol_type: None,
            physiological_cap_enabled: true,
            fat_cap: defaults::FAT_CAP_DEFAULT,
            cho_cap: defaults::CHO_CAP_DEFAULT,
            sliding_median_enabled: true,
            sliding_median_window: defaults::SLIDING_MEDIAN_WINDOW_DEFAULT,
            fatmax_bootstrap_enabled: false,
            fatmax_bootstrap_iterations: defaults::FATMAX_BOOTSTRAP_ITERATIONS_DEFAULT,
        }
    }
}

impl Config {
    /// Checks every field against its declared range (§3). Returns the first
    /// violation found, the way a fixed-field struct should fail fast rather
    /// than accumulate a report meant for free-form input.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        fn in_range(field: &str, value: f64, range: (f64, f64)) -> Result<(), AnalysisError> {
            if value < range.0 || value > range.1 {
                return Err(AnalysisError::ConfigInvalid {
                    field: field.to_string(),
                    message: format!(
                        "{value} is outside the valid range [{}, {}]",
                        range.0, range.1
                    ),
                });
            }
            Ok(())
        }

        in_range("bin_size_w", self.bin_size_w, defaults::BIN_SIZE_W_RANGE)?;
        in_range("loess_frac", self.loess_frac, defaults::LOESS_FRAC_RANGE)?;
        if let Some(min_power) = self.min_power_w {
            in_range("min_power_w", min_power, defaults::MIN_POWER_W_RANGE)?;
        }
        in_range(
            "fatmax_zone_threshold",
            self.fatmax_zone_threshold,
            defaults::FATMAX_ZONE_THRESHOLD_RANGE,
        )?;

        if self.outlier_iqr_multiplier <= 0.0 {
            return Err(AnalysisError::ConfigInvalid {
                field: "outlier_iqr_multiplier".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.min_bin_count == 0 {
            return Err(AnalysisError::ConfigInvalid {
                field: "min_bin_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.fat_cap <= 0.0 {
            return Err(AnalysisError::ConfigInvalid {
                field: "fat_cap".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.cho_cap <= 0.0 {
            return Err(AnalysisError::ConfigInvalid {
                field: "cho_cap".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.sliding_median_window == 0 || self.sliding_median_window % 2 == 0 {
            return Err(AnalysisError::ConfigInvalid {
                field: "sliding_median_window".to_string(),
                message: "must be a positive odd number".to_string(),
            });
        }
        if self.fatmax_bootstrap_enabled && self.fatmax_bootstrap_iterations == 0 {
            return Err(AnalysisError::ConfigInvalid {
                field: "fatmax_bootstrap_iterations".to_string(),
                message: "must be at least 1 when bootstrap is enabled".to_string(),
            });
        }
        // trim_start_sec/trim_end_sec ordering is window.rs's concern: that
        // condition must surface as WindowInvalid (§4.1/§7), not ConfigInvalid.
        if let (Some(start), Some(end)) = (self.vo2max_start_sec, self.vo2max_end_sec) {
            if end <= start {
                return Err(AnalysisError::ConfigInvalid {
                    field: "vo2max_end_sec".to_string(),
                    message: "must be greater than vo2max_start_sec".to_string(),
                });
            }
        }

        Ok(())
    }
}
