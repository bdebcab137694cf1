//! Load-bearing numeric kernels shared by the pipeline stages: quantile/IQR,
//! median/mean/trimmed-mean, tri-cube-weighted local linear regression, and
//! ordinary least squares polynomial fitting.
//!
//! These are the equivalents the teacher's `correlations.rs` module gets
//! from `statrs` plus a numerical array library; here they're hand-rolled
//! against `&[f64]` since the pipeline's per-channel slices are always small
//! (bin counts are tens, not thousands).

use statrs::statistics::{Data, OrderStatistics};

/// Median of a slice, ignoring NaN. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut data = Data::new(values.to_vec());
    Some(data.median())
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean after dropping the top and bottom `trim_frac` fraction of sorted
/// values (minimum of one value kept either side).
pub fn trimmed_mean(values: &[f64], trim_frac: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let cut = ((n as f64) * trim_frac).floor() as usize;
    let cut = cut.min((n.saturating_sub(1)) / 2);
    let trimmed = &sorted[cut..n - cut];
    mean(trimmed)
}

/// (Q1, Q3) of a slice via linear-interpolation quantiles, the same
/// convention `statrs::Data::quantile` uses.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let mut data = Data::new(values.to_vec());
    Some((data.quantile(0.25), data.quantile(0.75)))
}

/// Percentile (0-100) via linear interpolation.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut data = Data::new(values.to_vec());
    Some(data.quantile(pct / 100.0))
}

/// Tri-cube weight for `|u| < 1`, zero otherwise.
fn tricube(u: f64) -> f64 {
    let au = u.abs();
    if au >= 1.0 {
        0.0
    } else {
        let t = 1.0 - au * au * au;
        t * t * t
    }
}

/// Locally-weighted linear regression of `y` on `x`, evaluated at every
/// point in `x` itself (no resampling). `frac` is the fraction of points
/// used as the local neighborhood bandwidth, clamped to at least 2 points.
///
/// Points with `y = NaN` are excluded from every local fit; the output at
/// such an index is `NaN` too.
pub fn loess(x: &[f64], y: &[f64], frac: f64) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let valid: Vec<usize> = (0..n).filter(|&i| !y[i].is_nan()).collect();
    let window = ((valid.len() as f64) * frac).ceil().max(2.0) as usize;
    let window = window.min(valid.len());

    let mut out = vec![f64::NAN; n];
    if valid.is_empty() {
        return out;
    }

    for i in 0..n {
        let x0 = x[i];
        // Distances from x0 restricted to points with valid y.
        let mut by_dist: Vec<(f64, usize)> = valid.iter().map(|&j| ((x[j] - x0).abs(), j)).collect();
        by_dist.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let neighborhood = &by_dist[..window.min(by_dist.len())];
        let bandwidth = neighborhood.last().map(|(d, _)| *d).unwrap_or(0.0).max(1e-9);

        let mut sw = 0.0;
        let mut swx = 0.0;
        let mut swy = 0.0;
        let mut swxx = 0.0;
        let mut swxy = 0.0;
        for &(dist, j) in neighborhood {
            let w = tricube(dist / bandwidth);
            let xj = x[j];
            let yj = y[j];
            sw += w;
            swx += w * xj;
            swy += w * yj;
            swxx += w * xj * xj;
            swxy += w * xj * yj;
        }
        if sw <= 0.0 {
            continue;
        }
        let denom = sw * swxx - swx * swx;
        let value = if denom.abs() < 1e-12 {
            swy / sw
        } else {
            let slope = (sw * swxy - swx * swy) / denom;
            let intercept = (swy - slope * swx) / sw;
            intercept + slope * x0
        };
        out[i] = value;
    }
    out
}

/// Fit an ordinary-least-squares polynomial of `degree` to (x, y), excluding
/// any pair where `y` is NaN. Returns the coefficients `[c0, c1, ..., cd]`
/// (lowest degree first), or `None` if there are fewer non-NaN points than
/// `degree + 1` or the normal-equations matrix is singular.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Option<Vec<f64>> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(_, yv)| !yv.is_nan())
        .map(|(&xv, &yv)| (xv, yv))
        .collect();
    if pairs.len() < degree + 1 {
        return None;
    }

    let m = degree + 1;
    // Normal equations: (X^T X) c = X^T y, built directly (no matrix crate —
    // degree never exceeds 4, so this is a 5x5 solve at most).
    let mut ata = vec![vec![0.0_f64; m]; m];
    let mut aty = vec![0.0_f64; m];
    for &(xv, yv) in &pairs {
        let mut powers = vec![1.0_f64; m];
        for k in 1..m {
            powers[k] = powers[k - 1] * xv;
        }
        for r in 0..m {
            aty[r] += powers[r] * yv;
            for c in 0..m {
                ata[r][c] += powers[r] * powers[c];
            }
        }
    }
    solve_linear_system(ata, aty)
}

/// Evaluate a polynomial (lowest-degree-first coefficients) at `x`.
pub fn polyeval(coeffs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    let mut p = 1.0;
    for &c in coeffs {
        acc += c * p;
        p *= x;
    }
    acc
}

/// Gaussian elimination with partial pivoting. `None` on a singular matrix.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&r1, &r2| {
            a[r1][col].abs().partial_cmp(&a[r2][col].abs()).unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        let pivot_val = a[col][col];
        for c in col..n {
            a[col][c] /= pivot_val;
        }
        b[col] /= pivot_val;

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[row][c] -= factor * a[col][c];
            }
            b[row] -= factor * b[col];
        }
    }
    Some(b)
}
