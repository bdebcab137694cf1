//! C3–C5: hard-cap filtering, IQR outlier rejection, sliding-median smoothing.

mod hard_cap;
mod median_smoother;
mod outlier;

pub use hard_cap::apply as hard_cap_filter;
pub use median_smoother::apply as sliding_median_smoother;
pub use outlier::apply as iqr_outlier_filter;
