//! C4 — IQR Outlier Filter: remove breath-level outliers from the cleaned
//! stream.
//!
//! The `raw` series published to the caller is taken before this filter
//! runs (§4.4) — callers see the pristine projection; downstream stages
//! consume what this function returns.

use crate::config::Config;
use crate::numeric::quartiles;
use crate::types::ProcessedPoint;

const MIN_POINTS_TO_FILTER: usize = 10;

pub fn apply(points: &[ProcessedPoint], config: &Config) -> Vec<ProcessedPoint> {
    if !config.outlier_enabled || points.len() < MIN_POINTS_TO_FILTER {
        return points.to_vec();
    }

    let fat_values: Vec<f64> = points.iter().filter_map(|p| p.fat_oxidation).collect();
    let cho_values: Vec<f64> = points.iter().filter_map(|p| p.cho_oxidation).collect();

    let fat_bounds = quartiles(&fat_values).map(|(q1, q3)| bounds(q1, q3, config.outlier_iqr_multiplier));
    let cho_bounds = quartiles(&cho_values).map(|(q1, q3)| bounds(q1, q3, config.outlier_iqr_multiplier));

    points
        .iter()
        .filter(|p| {
            let fat_ok = match (p.fat_oxidation, fat_bounds) {
                (Some(v), Some((lo, hi))) => v >= lo && v <= hi,
                _ => true,
            };
            let cho_ok = match (p.cho_oxidation, cho_bounds) {
                (Some(v), Some((lo, hi))) => v >= lo && v <= hi,
                _ => true,
            };
            fat_ok && cho_ok
        })
        .copied()
        .collect()
}

fn bounds(q1: f64, q3: f64, multiplier: f64) -> (f64, f64) {
    let iqr = q3 - q1;
    (q1 - multiplier * iqr, q3 + multiplier * iqr)
}
