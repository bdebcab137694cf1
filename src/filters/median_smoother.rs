//! C5 — Sliding-Median Smoother: replace individual spikes with the local
//! median over a power-sorted window.

use crate::config::Config;
use crate::numeric::median;
use crate::types::ProcessedPoint;

pub fn apply(points: &[ProcessedPoint], config: &Config) -> Vec<ProcessedPoint> {
    let window = config.sliding_median_window;
    if !config.sliding_median_enabled || points.len() < window {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.power_w.partial_cmp(&b.power_w).unwrap_or(std::cmp::Ordering::Equal));

    let half = window / 2;
    let n = sorted.len();
    let fat_original: Vec<Option<f64>> = sorted.iter().map(|p| p.fat_oxidation).collect();
    let cho_original: Vec<Option<f64>> = sorted.iter().map(|p| p.cho_oxidation).collect();

    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);
        sorted[i].fat_oxidation = windowed_median(&fat_original[lo..hi]);
        sorted[i].cho_oxidation = windowed_median(&cho_original[lo..hi]);
    }

    sorted
}

fn windowed_median(window: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = window.iter().filter_map(|v| *v).collect();
    median(&values)
}
