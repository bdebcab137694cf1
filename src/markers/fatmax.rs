//! C9 — FatMax Detector: locate MFO and its surrounding zone, with an
//! optional bootstrap confidence interval.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::error::AnalysisError;
use crate::numeric::percentile;
use crate::smoothing;
use crate::types::{FatMaxMarker, ProcessedPoint};

const MIN_RESAMPLE_SUCCESS_FRACTION: f64 = 0.5;

pub fn detect(
    smoothed: &[ProcessedPoint],
    binned: &[ProcessedPoint],
    config: &Config,
    seed: u64,
) -> Result<(FatMaxMarker, Vec<String>), AnalysisError> {
    let mut warnings = Vec::new();

    let mfo_index = peak_fat_index(smoothed)
        .ok_or_else(|| AnalysisError::FatMaxUndefined("smoothed fat_oxidation channel is entirely null".to_string()))?;

    let mfo = smoothed[mfo_index].fat_oxidation.expect("index located by peak_fat_index");
    let power_w = smoothed[mfo_index].power_w;

    if mfo_index == 0 || mfo_index == smoothed.len() - 1 {
        warnings.push("boundary_fatmax: maximum fat oxidation occurs at the edge of the analyzed window".to_string());
    }

    let (zone_min_w, zone_max_w) = zone_bounds(smoothed, mfo_index, mfo, config.fatmax_zone_threshold);

    let mut marker = FatMaxMarker {
        power_w: power_w.round() as i32,
        mfo_g_min: mfo,
        zone_min_w: zone_min_w.round() as i32,
        zone_max_w: zone_max_w.round() as i32,
        mfo_ci_lower: None,
        mfo_ci_upper: None,
        power_ci_lower: None,
        power_ci_upper: None,
    };

    if config.fatmax_bootstrap_enabled {
        match bootstrap_ci(binned, config, seed) {
            Some((mfo_ci, power_ci)) => {
                marker.mfo_ci_lower = Some(mfo_ci.0);
                marker.mfo_ci_upper = Some(mfo_ci.1);
                marker.power_ci_lower = Some(power_ci.0.round() as i32);
                marker.power_ci_upper = Some(power_ci.1.round() as i32);
            }
            None => warnings.push(
                "bootstrap CI skipped: fewer than half of resamples produced a defined FatMax".to_string(),
            ),
        }
    }

    Ok((marker, warnings))
}

fn peak_fat_index(series: &[ProcessedPoint]) -> Option<usize> {
    series
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.fat_oxidation.map(|v| (i, v)))
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

fn zone_bounds(series: &[ProcessedPoint], peak_index: usize, mfo: f64, threshold: f64) -> (f64, f64) {
    let cutoff = threshold * mfo;

    let mut min_index = peak_index;
    while min_index > 0 {
        let prev = min_index - 1;
        match series[prev].fat_oxidation {
            Some(v) if v >= cutoff => min_index = prev,
            _ => break,
        }
    }

    let mut max_index = peak_index;
    while max_index < series.len() - 1 {
        let next = max_index + 1;
        match series[next].fat_oxidation {
            Some(v) if v >= cutoff => max_index = next,
            _ => break,
        }
    }

    (series[min_index].power_w, series[max_index].power_w)
}

/// Resample binned points with replacement, re-smooth with the teacher's
/// same-bandwidth approach (an open question noted in `SPEC_FULL.md` §9),
/// and recompute MFO / its workload. Returns `None` when fewer than half
/// the resamples produce a defined FatMax.
fn bootstrap_ci(
    binned: &[ProcessedPoint],
    config: &Config,
    seed: u64,
) -> Option<((f64, f64), (f64, f64))> {
    if binned.is_empty() {
        return None;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut mfo_samples = Vec::with_capacity(config.fatmax_bootstrap_iterations);
    let mut power_samples = Vec::with_capacity(config.fatmax_bootstrap_iterations);

    for _ in 0..config.fatmax_bootstrap_iterations {
        let mut resample: Vec<ProcessedPoint> = (0..binned.len())
            .map(|_| *binned.choose(&mut rng).expect("binned is non-empty"))
            .collect();
        resample.sort_by(|a, b| a.power_w.partial_cmp(&b.power_w).unwrap_or(std::cmp::Ordering::Equal));

        let (resmoothed, _) = smoothing::smooth(&resample, config);
        if let Some(idx) = peak_fat_index(&resmoothed) {
            mfo_samples.push(resmoothed[idx].fat_oxidation.expect("index from peak_fat_index"));
            power_samples.push(resmoothed[idx].power_w);
        }
    }

    let success_fraction = mfo_samples.len() as f64 / config.fatmax_bootstrap_iterations as f64;
    if success_fraction < MIN_RESAMPLE_SUCCESS_FRACTION {
        return None;
    }

    let mfo_ci = (percentile(&mfo_samples, 2.5)?, percentile(&mfo_samples, 97.5)?);
    let power_ci = (percentile(&power_samples, 2.5)?, percentile(&power_samples, 97.5)?);
    Some((mfo_ci, power_ci))
}
