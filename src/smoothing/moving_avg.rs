//! Simple centered moving average over the `frac`-sized neighborhood,
//! restricted to non-null values. An alternative to LOESS for callers who
//! prefer a cheaper, less shape-preserving smoother.

pub fn smooth(x: &[f64], y: &[f64], frac: f64) -> Vec<f64> {
    let n = x.len();
    let valid: Vec<usize> = (0..n).filter(|&i| !y[i].is_nan()).collect();
    if valid.is_empty() {
        return vec![f64::NAN; n];
    }
    let window = ((valid.len() as f64) * frac).ceil().max(2.0) as usize;

    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        let x0 = x[i];
        let mut by_dist: Vec<(f64, usize)> = valid.iter().map(|&j| ((x[j] - x0).abs(), j)).collect();
        by_dist.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let neighborhood = &by_dist[..window.min(by_dist.len())];
        let sum: f64 = neighborhood.iter().map(|&(_, j)| y[j]).sum();
        out[i] = sum / neighborhood.len() as f64;
    }
    out
}
