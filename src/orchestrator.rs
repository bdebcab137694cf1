//! C11 — Analysis Orchestrator: runs C1-C10 in order and assembles the
//! result. Pure and deterministic: identical inputs, config, and seed
//! always yield an identical result.

use tracing::{debug, warn};

use crate::binning;
use crate::config::Config;
use crate::config::defaults::{MIN_BINNED_POINTS, MIN_BREATHS_TO_ANALYZE};
use crate::error::AnalysisError;
use crate::extract;
use crate::filters;
use crate::markers::{crossover, fatmax};
use crate::smoothing;
use crate::trend;
use crate::types::{
    AnalysisResult, MetabolicMarkers, ProcessedSeries, Stats, ALGORITHM_VERSION,
};
use crate::types::Breath;
use crate::vo2max;

/// Run the full pipeline on one test's breaths.
pub fn analyze(breaths: &[Breath], config: &Config, seed: u64) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;

    let total_data_points = breaths.len();
    let (filtered, trim_range) = crate::window::select(breaths, config)?;
    debug!(count = filtered.len(), "window selected");

    if filtered.len() < MIN_BREATHS_TO_ANALYZE {
        return Err(AnalysisError::InsufficientData(format!(
            "{} breaths remain after windowing/phase filtering, need at least {}",
            filtered.len(),
            MIN_BREATHS_TO_ANALYZE
        )));
    }
    let exercise_data_points = filtered.len();

    let mut warnings = Vec::new();

    let mut raw = extract::extract(&filtered);
    let (fat_capped, cho_capped) = filters::hard_cap_filter(&mut raw, config);
    if fat_capped > 0 {
        warnings.push(format!("hard_cap: {fat_capped} fat_oxidation values exceeded the physiological cap and were nulled"));
    }
    if cho_capped > 0 {
        warnings.push(format!("hard_cap: {cho_capped} cho_oxidation values exceeded the physiological cap and were nulled"));
    }

    let cleaned = filters::iqr_outlier_filter(&raw, config);
    let cleaned = filters::sliding_median_smoother(&cleaned, config);

    let binned = binning::bin(&cleaned, config);
    if binned.len() < MIN_BINNED_POINTS {
        return Err(AnalysisError::InsufficientData(format!(
            "{} binned points, need at least {}",
            binned.len(),
            MIN_BINNED_POINTS
        )));
    }
    if binned
        .iter()
        .any(|p| p.count.map_or(false, |c| (c as usize) < config.min_bin_count))
    {
        warnings.push("all_sparse_bins: some bins remain under min_bin_count with no qualifying merge target".to_string());
    }
    let binned_data_points = binned.len();

    let (smoothed, smoothing_warnings) = smoothing::smooth(&binned, config);
    warnings.extend(smoothing_warnings);

    let trend_series = trend::fit(&binned, config);

    let fat_max = match fatmax::detect(&smoothed, &binned, config, seed) {
        Ok((marker, fatmax_warnings)) => {
            warnings.extend(fatmax_warnings);
            Some(marker)
        }
        Err(AnalysisError::FatMaxUndefined(msg)) => {
            warn!(%msg, "fatmax undefined");
            warnings.push(format!("fatmax_undefined: {msg}"));
            None
        }
        Err(other) => return Err(other),
    };

    let all_crossovers = crossover::detect(&smoothed);
    let primary_crossover = all_crossovers.first().copied().unwrap_or(crate::types::CrossoverMarker::NONE);

    let vo2max_metrics = crate::window::vo2max_window(breaths, config)
        .as_deref()
        .and_then(vo2max::compute);

    Ok(AnalysisResult {
        config: config.clone(),
        processed_series: ProcessedSeries {
            raw,
            binned,
            smoothed,
            trend: trend_series,
        },
        metabolic_markers: MetabolicMarkers {
            fat_max,
            crossover: primary_crossover,
            all_crossovers,
        },
        vo2max_metrics,
        stats: Stats {
            total_data_points,
            exercise_data_points,
            binned_data_points,
        },
        trim_range,
        processing_warnings: warnings,
        algorithm_version: ALGORITHM_VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn ramp_breaths(n: usize, duration_sec: f64, peak_power: f64) -> Vec<Breath> {
        (0..n)
            .map(|i| {
                let frac = i as f64 / (n - 1) as f64;
                let power = peak_power * frac;
                let vo2 = 400.0 + power * 10.0;
                let vco2 = vo2 * (0.80 + 0.25 * frac);
                let fat = (0.5 - 0.45 * (frac - 0.3).abs()).max(0.0);
                let cho = (0.3 + 3.5 * frac).max(0.0);
                Breath {
                    time_sec: frac * duration_sec,
                    power_w: power,
                    vo2_ml_min: vo2,
                    vco2_ml_min: vco2,
                    heart_rate: 70.0 + 100.0 * frac,
                    rer: (vco2 / vo2).clamp(0.7, 1.3),
                    fat_ox_g_min: fat,
                    cho_ox_g_min: cho,
                    phase: Some(if frac < 0.02 {
                        Phase::Warmup
                    } else {
                        Phase::Exercise
                    }),
                    body_mass_kg: Some(75.0),
                }
            })
            .collect()
    }

    #[test]
    fn determinism_same_inputs_same_seed_same_output() {
        let breaths = ramp_breaths(1200, 1200.0, 300.0);
        let config = Config::default();
        let a = analyze(&breaths, &config, 42).unwrap();
        let b = analyze(&breaths, &config, 42).unwrap();
        assert_eq!(a.metabolic_markers.fat_max.map(|m| m.power_w), b.metabolic_markers.fat_max.map(|m| m.power_w));
        assert_eq!(a.processed_series.binned.len(), b.processed_series.binned.len());
        assert_eq!(a.processed_series.smoothed.len(), a.processed_series.trend.len());
    }

    #[test]
    fn supports_are_consistent_across_series() {
        let breaths = ramp_breaths(1200, 1200.0, 300.0);
        let config = Config::default();
        let result = analyze(&breaths, &config, 1).unwrap();
        assert_eq!(result.processed_series.binned.len(), result.processed_series.smoothed.len());
        assert_eq!(result.processed_series.smoothed.len(), result.processed_series.trend.len());
        assert!(result.processed_series.raw.len() >= result.processed_series.binned.len());
    }

    #[test]
    fn short_manual_window_is_rejected() {
        let breaths = ramp_breaths(200, 1200.0, 300.0);
        let mut config = Config::default();
        config.trim_start_sec = Some(600.0);
        config.trim_end_sec = Some(720.0);
        let err = analyze(&breaths, &config, 1).unwrap_err();
        assert!(matches!(err, AnalysisError::WindowInvalid(_)));
    }

    #[test]
    fn crossover_workload_exceeds_fatmax_workload() {
        let breaths = ramp_breaths(1200, 1200.0, 300.0);
        let config = Config::default();
        let result = analyze(&breaths, &config, 1).unwrap();
        if let (Some(fat_max), Some(crossover_power)) =
            (result.metabolic_markers.fat_max, result.metabolic_markers.crossover.power_w)
        {
            assert!(crossover_power > fat_max.power_w);
        }
    }
}
