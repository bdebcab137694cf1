//! Savitzky-Golay-style smoothing: a local quadratic fit evaluated at the
//! window center, using the same `frac`-sized neighborhood as LOESS but
//! unweighted (box window) rather than tri-cube weighted.

use crate::numeric::{polyeval, polyfit};

pub fn smooth(x: &[f64], y: &[f64], frac: f64) -> Vec<f64> {
    let n = x.len();
    let valid: Vec<usize> = (0..n).filter(|&i| !y[i].is_nan()).collect();
    if valid.is_empty() {
        return vec![f64::NAN; n];
    }
    let window = ((valid.len() as f64) * frac).ceil().max(3.0) as usize;

    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        let x0 = x[i];
        let mut by_dist: Vec<(f64, usize)> = valid.iter().map(|&j| ((x[j] - x0).abs(), j)).collect();
        by_dist.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let take = window.min(by_dist.len());
        let local_x: Vec<f64> = by_dist[..take].iter().map(|&(_, j)| x[j]).collect();
        let local_y: Vec<f64> = by_dist[..take].iter().map(|&(_, j)| y[j]).collect();

        let degree = if take >= 3 { 2 } else { 1 };
        out[i] = match polyfit(&local_x, &local_y, degree) {
            Some(coeffs) => polyeval(&coeffs, x0),
            None => local_y.iter().sum::<f64>() / local_y.len() as f64,
        };
    }
    out
}
