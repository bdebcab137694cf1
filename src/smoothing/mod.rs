//! C7 — Local-Regression Smoother: adaptive-bandwidth smoothing over the
//! binned series.

mod loess;
mod moving_avg;
mod savgol;

use crate::config::{Config, SmoothingMethod};
use crate::types::ProcessedPoint;

const MIN_NON_NULL_FOR_CHANNEL: usize = 4;
const RER_MIN: f64 = 0.5;
const RER_MAX: f64 = 1.5;

/// Smooth every channel of a binned series independently. Output has one
/// point per binned workload (no resampling); `count` is always `None`.
pub fn smooth(binned: &[ProcessedPoint], config: &Config) -> (Vec<ProcessedPoint>, Vec<String>) {
    let mut warnings = Vec::new();
    if binned.is_empty() {
        return (Vec::new(), warnings);
    }

    let x: Vec<f64> = binned.iter().map(|p| p.power_w).collect();
    let frac = effective_frac(binned.len(), config);

    let smooth_channel = |extract: fn(&ProcessedPoint) -> Option<f64>, name: &str| -> Vec<Option<f64>> {
        let y: Vec<f64> = binned.iter().map(|p| extract(p).unwrap_or(f64::NAN)).collect();
        let non_null = y.iter().filter(|v| !v.is_nan()).count();
        if non_null < MIN_NON_NULL_FOR_CHANNEL {
            warnings.push(format!("{name}: fewer than 4 non-null binned values, channel is null in smoothed series"));
            return vec![None; x.len()];
        }
        apply_method(&x, &y, frac, config.smoothing_method)
            .into_iter()
            .map(|v| if v.is_nan() { None } else { Some(v) })
            .collect()
    };

    let fat = smooth_channel(|p| p.fat_oxidation, "fat_oxidation");
    let cho = smooth_channel(|p| p.cho_oxidation, "cho_oxidation");
    let mut rer = smooth_channel(|p| p.rer, "rer");
    let vo2_rel = smooth_channel(|p| p.vo2_rel, "vo2_rel");
    let vo2 = smooth_channel(|p| p.vo2, "vo2");
    let vco2 = smooth_channel(|p| p.vco2, "vco2");
    let hr = smooth_channel(|p| p.hr, "hr");

    for value in rer.iter_mut() {
        if let Some(v) = *value {
            if v < RER_MIN || v > RER_MAX {
                *value = None;
            }
        }
    }

    let smoothed: Vec<ProcessedPoint> = (0..binned.len())
        .map(|i| ProcessedPoint {
            power_w: x[i],
            fat_oxidation: fat[i],
            cho_oxidation: cho[i],
            rer: rer[i],
            vo2_rel: vo2_rel[i],
            vo2: vo2[i],
            vco2: vco2[i],
            hr: hr[i],
            count: None,
        })
        .collect();

    (smoothed, warnings)
}

/// `frac = clamp(4 / n, 0.15, 0.5)` when adaptive, else `loess_frac` verbatim (§4.7).
pub fn effective_frac(n: usize, config: &Config) -> f64 {
    if !config.adaptive_loess {
        return config.loess_frac;
    }
    (4.0 / n as f64).clamp(0.15, 0.5)
}

fn apply_method(x: &[f64], y: &[f64], frac: f64, method: SmoothingMethod) -> Vec<f64> {
    match method {
        SmoothingMethod::Loess => loess::smooth(x, y, frac),
        SmoothingMethod::Savgol => savgol::smooth(x, y, frac),
        SmoothingMethod::MovingAvg => moving_avg::smooth(x, y, frac),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binned_point(power: f64, fat: f64) -> ProcessedPoint {
        let mut p = ProcessedPoint::new(power);
        p.fat_oxidation = Some(fat);
        p.cho_oxidation = Some(1.0);
        p.rer = Some(0.9);
        p.vo2 = Some(2000.0);
        p.vco2 = Some(1800.0);
        p.hr = Some(140.0);
        p.count = Some(5);
        p
    }

    #[test]
    fn smoothed_series_matches_binned_support() {
        let binned: Vec<ProcessedPoint> = (0..10).map(|i| binned_point(i as f64 * 10.0, 0.3)).collect();
        let config = Config::default();
        let (smoothed, _) = smooth(&binned, &config);
        assert_eq!(smoothed.len(), binned.len());
        assert!(smoothed.iter().all(|p| p.count.is_none()));
    }

    #[test]
    fn sub_four_point_channel_is_null() {
        let mut binned: Vec<ProcessedPoint> = (0..10).map(|i| binned_point(i as f64 * 10.0, 0.3)).collect();
        for (i, p) in binned.iter_mut().enumerate() {
            if i >= 2 {
                p.hr = None;
            }
        }
        let config = Config::default();
        let (smoothed, warnings) = smooth(&binned, &config);
        assert!(smoothed.iter().all(|p| p.hr.is_none()));
        assert!(warnings.iter().any(|w| w.contains("hr")));
    }

    #[test]
    fn out_of_range_rer_becomes_null() {
        let mut binned: Vec<ProcessedPoint> = (0..10).map(|i| binned_point(i as f64 * 10.0, 0.3)).collect();
        binned[5].rer = Some(3.0);
        let config = Config::default();
        let (smoothed, _) = smooth(&binned, &config);
        assert!(smoothed.iter().all(|p| p.rer.map_or(true, |r| (0.5..=1.5).contains(&r))));
    }
}
