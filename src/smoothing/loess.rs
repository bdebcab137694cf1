//! Locally-weighted regression (tri-cube kernel), the default method.

use crate::numeric;

pub fn smooth(x: &[f64], y: &[f64], frac: f64) -> Vec<f64> {
    numeric::loess(x, y, frac)
}
