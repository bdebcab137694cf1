//! Default values and valid ranges for every [`super::Config`] field.
//!
//! Kept as named constants, in the spirit of the teacher's
//! `types::thresholds::drilling_thresholds` module, so the numbers have a
//! single source of truth for both `Default` and `validate`.

pub const BIN_SIZE_W_RANGE: (f64, f64) = (5.0, 30.0);
pub const BIN_SIZE_W_DEFAULT: f64 = 10.0;

pub const LOESS_FRAC_RANGE: (f64, f64) = (0.1, 0.5);
pub const LOESS_FRAC_DEFAULT: f64 = 0.25;

pub const MIN_POWER_W_RANGE: (f64, f64) = (0.0, 200.0);

pub const FATMAX_ZONE_THRESHOLD_RANGE: (f64, f64) = (0.5, 1.0);
pub const FATMAX_ZONE_THRESHOLD_DEFAULT: f64 = 0.90;

pub const OUTLIER_IQR_MULTIPLIER_DEFAULT: f64 = 1.5;
pub const MIN_BIN_COUNT_DEFAULT: usize = 3;

pub const FAT_CAP_DEFAULT: f64 = 2.0;
pub const CHO_CAP_DEFAULT: f64 = 8.0;

pub const SLIDING_MEDIAN_WINDOW_DEFAULT: usize = 5;

pub const FATMAX_BOOTSTRAP_ITERATIONS_DEFAULT: usize = 500;

/// Hard minimum of breaths to attempt the pipeline at all (§7 `InsufficientData`).
pub const MIN_BREATHS_TO_ANALYZE: usize = 10;
/// Hard minimum of binned points to run smoothing/trend/markers.
pub const MIN_BINNED_POINTS: usize = 3;

/// Auto-detect start threshold (watts), per protocol type.
pub fn window_start_threshold_w(protocol: Option<super::ProtocolType>) -> f64 {
    match protocol {
        Some(super::ProtocolType::Ramp) => 30.0,
        Some(super::ProtocolType::Step) | Some(super::ProtocolType::Graded) => 20.0,
        None => 20.0,
    }
}

/// Fraction of the post-peak decline kept in the auto-detected window, per
/// protocol type.
pub fn recovery_cutoff_fraction(protocol: Option<super::ProtocolType>) -> f64 {
    match protocol {
        Some(super::ProtocolType::Ramp) => 0.70,
        Some(super::ProtocolType::Step) | Some(super::ProtocolType::Graded) => 0.85,
        None => 0.75,
    }
}

/// Minimum window length (seconds) — trim windows shorter than this fail
/// validation (§4.1).
pub const MIN_WINDOW_SECONDS: f64 = 180.0;
