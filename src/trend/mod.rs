//! C8 — Polynomial Trend Fitter: per-channel polynomial fit with
//! cross-validated degree for the metabolic channels.

use crate::config::Config;
use crate::numeric::{polyeval, polyfit};
use crate::types::ProcessedPoint;

const PHYSIOLOGICAL_DEGREE: usize = 2;
const FIXED_DEGREE_WHEN_NOT_ADAPTIVE: usize = 3;
const CANDIDATE_DEGREES: [usize; 4] = [1, 2, 3, 4];
const FALLBACK_DEGREE: usize = 2;

/// Fit and evaluate the trend series on the same support as `binned`.
pub fn fit(binned: &[ProcessedPoint], config: &Config) -> Vec<ProcessedPoint> {
    let x: Vec<f64> = binned.iter().map(|p| p.power_w).collect();

    let physiological = |extract: fn(&ProcessedPoint) -> Option<f64>| -> Vec<Option<f64>> {
        let y: Vec<f64> = binned.iter().map(|p| extract(p).unwrap_or(f64::NAN)).collect();
        evaluate(&x, &y, PHYSIOLOGICAL_DEGREE)
    };

    let adaptive = |extract: fn(&ProcessedPoint) -> Option<f64>| -> Vec<Option<f64>> {
        let y: Vec<f64> = binned.iter().map(|p| extract(p).unwrap_or(f64::NAN)).collect();
        let degree = select_degree(&x, &y, config.adaptive_polynomial);
        evaluate(&x, &y, degree)
    };

    let fat = adaptive(|p| p.fat_oxidation);
    let cho = adaptive(|p| p.cho_oxidation);
    let rer = adaptive(|p| p.rer);
    let vo2_rel = physiological(|p| p.vo2_rel);
    let vo2 = physiological(|p| p.vo2);
    let vco2 = physiological(|p| p.vco2);
    let hr = physiological(|p| p.hr);

    (0..binned.len())
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
        .collect()
}

fn evaluate(x: &[f64], y: &[f64], degree: usize) -> Vec<Option<f64>> {
    match polyfit(x, y, degree) {
        Some(coeffs) => x.iter().map(|&xv| Some(polyeval(&coeffs, xv))).collect(),
        None => vec![None; x.len()],
    }
}

fn non_null_count(y: &[f64]) -> usize {
    y.iter().filter(|v| !v.is_nan()).count()
}

/// Select the degree minimizing leave-one-out cross-validated RMSE among
/// `{1, 2, 3, 4}`; falls back to degree 2 when no candidate has enough
/// points (`n <= d + 2`) to cross-validate (§4.8).
fn select_degree(x: &[f64], y: &[f64], adaptive: bool) -> usize {
    if !adaptive {
        return FIXED_DEGREE_WHEN_NOT_ADAPTIVE;
    }

    let n = non_null_count(y);
    let mut best: Option<(usize, f64)> = None;
    for &degree in &CANDIDATE_DEGREES {
        if n <= degree + 2 {
            continue;
        }
        if let Some(rmse) = loocv_rmse(x, y, degree) {
            if best.map_or(true, |(_, best_rmse)| rmse < best_rmse) {
                best = Some((degree, rmse));
            }
        }
    }
    best.map(|(degree, _)| degree).unwrap_or(FALLBACK_DEGREE)
}

fn loocv_rmse(x: &[f64], y: &[f64], degree: usize) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(_, yv)| !yv.is_nan())
        .map(|(&xv, &yv)| (xv, yv))
        .collect();

    let mut squared_errors = Vec::with_capacity(pairs.len());
    for leave_out in 0..pairs.len() {
        let train_x: Vec<f64> = pairs.iter().enumerate().filter(|(i, _)| *i != leave_out).map(|(_, p)| p.0).collect();
        let train_y: Vec<f64> = pairs.iter().enumerate().filter(|(i, _)| *i != leave_out).map(|(_, p)| p.1).collect();
        let (held_out_x, held_out_y) = pairs[leave_out];
        let coeffs = polyfit(&train_x, &train_y, degree)?;
        let prediction = polyeval(&coeffs, held_out_x);
        squared_errors.push((prediction - held_out_y).powi(2));
    }
    if squared_errors.is_empty() {
        return None;
    }
    let mse = squared_errors.iter().sum::<f64>() / squared_errors.len() as f64;
    Some(mse.sqrt())
}
